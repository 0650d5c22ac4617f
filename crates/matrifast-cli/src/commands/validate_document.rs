//! `matrifast validate-document`: check one identity document.

use serde::Serialize;
use tracing::debug;

use matrifast_core::{
    domain::{Document, validator_for},
    error::MatriFastError,
};

use crate::{cli::ValidateDocumentArgs, error::CliResult, output::OutputManager};

#[derive(Debug, Serialize)]
struct ValidDocument<'a> {
    valid: bool,
    #[serde(rename = "type")]
    doc_type: &'a str,
    number: &'a str,
    rule: &'static str,
}

pub fn execute(args: ValidateDocumentArgs, output: OutputManager) -> CliResult<()> {
    let document = Document::new(&args.doc_type, &args.number).map_err(MatriFastError::from)?;
    let rule = validator_for(document.doc_type()).describe();
    debug!(doc_type = %document.doc_type(), rule, "Document accepted");

    if output.is_json() {
        output.json(&ValidDocument {
            valid: true,
            doc_type: document.doc_type().as_str(),
            number: document.number(),
            rule,
        })?;
    } else {
        output.success(&format!(
            "{} {} is valid",
            document.doc_type(),
            document.number()
        ))?;
        output.info(&format!("Rule: {rule}"))?;
    }

    Ok(())
}
