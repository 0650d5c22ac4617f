//! `matrifast register`: validate submitted forms and register their users.
//!
//! A single file either registers or fails with the first invalid field. A
//! directory is processed as a batch: every rejected submission is reported
//! and the command fails at the end if any were rejected (immediately with
//! `--fail-fast`).

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use matrifast_adapters::{FormLoader, FormSubmission, InMemoryUserRepository, SubmissionKind};
use matrifast_core::{
    application::RegistrationService,
    domain::{User, UserRecord, Usuario},
};

use crate::{
    cli::{RegisterArgs, UserKind},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: RegisterArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let fail_fast = args.fail_fast || config.registration.fail_fast;
    let defaults = Defaults {
        kind: args.kind.map(SubmissionKind::from),
        fallback_kind: config_kind(&config),
        email: args.email,
    };

    let loader = FormLoader::new(&args.path);
    let service = RegistrationService::new(Box::new(InMemoryUserRepository::new()));

    if loader.root().is_file() {
        return register_single(&loader, &service, &defaults, &output);
    }
    register_batch(&loader, &service, &defaults, fail_fast, &output)
}

/// Command-line values win over the submission; the configured kind is used
/// only when neither names one.
struct Defaults {
    kind: Option<SubmissionKind>,
    fallback_kind: Option<SubmissionKind>,
    email: Option<String>,
}

impl From<UserKind> for SubmissionKind {
    fn from(kind: UserKind) -> Self {
        match kind {
            UserKind::Docente => Self::Docente,
            UserKind::Representante => Self::Representante,
        }
    }
}

fn config_kind(config: &AppConfig) -> Option<SubmissionKind> {
    match config.registration.default_kind.as_deref() {
        Some("docente") => Some(SubmissionKind::Docente),
        Some("representante") => Some(SubmissionKind::Representante),
        _ => None,
    }
}

#[instrument(skip_all, fields(path = %loader.root().display()))]
fn register_single(
    loader: &FormLoader,
    service: &RegistrationService,
    defaults: &Defaults,
    output: &OutputManager,
) -> CliResult<()> {
    let report = loader.load()?;
    let mut registered = Vec::with_capacity(1);
    for (path, submission) in report.loaded {
        registered.push(register_one(service, &path, submission, defaults)?);
    }
    print_registered(&registered, output)
}

#[instrument(skip_all, fields(path = %loader.root().display()))]
fn register_batch(
    loader: &FormLoader,
    service: &RegistrationService,
    defaults: &Defaults,
    fail_fast: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let report = loader.load()?;
    let total = report.loaded.len() + report.failed.len();
    let mut failed = 0usize;

    for (path, err) in &report.failed {
        failed += 1;
        output.error(&format!("{}: {err}", path.display()))?;
    }

    let mut registered = Vec::new();
    if failed == 0 || !fail_fast {
        for (path, submission) in report.loaded {
            match register_one(service, &path, submission, defaults) {
                Ok(user) => registered.push(user),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "Submission rejected");
                    failed += 1;
                    output.error(&format!("{}: {err}", path.display()))?;
                    if fail_fast {
                        break;
                    }
                }
            }
        }
    }

    if total == 0 {
        output.warning(&format!(
            "No .json or .toml submissions found in {}",
            loader.root().display()
        ))?;
    }

    print_registered(&registered, output)?;
    info!(registered = registered.len(), failed, total, "Batch finished");

    if failed > 0 {
        return Err(CliError::BatchRejected { failed, total });
    }
    Ok(())
}

fn register_one(
    service: &RegistrationService,
    path: &Path,
    submission: FormSubmission,
    defaults: &Defaults,
) -> CliResult<Usuario> {
    let kind = defaults
        .kind
        .or(submission.kind)
        .or(defaults.fallback_kind)
        .ok_or_else(|| CliError::InvalidInput {
            message: format!(
                "'{}' does not say whether it registers a docente or a representante; pass --as",
                path.display()
            ),
            source: None,
        })?;

    let email = defaults
        .email
        .clone()
        .or(submission.email)
        .unwrap_or_default();

    debug!(path = %path.display(), %kind, "Registering submission");
    let user = match kind {
        SubmissionKind::Docente => service.register_docente(&submission.form, &email)?,
        SubmissionKind::Representante => {
            service.register_representante(&submission.form, &email)?
        }
    };
    Ok(user)
}

fn print_registered(users: &[Usuario], output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        let records: Vec<UserRecord> = users.iter().map(User::serialize).collect();
        output.json(&records)?;
        return Ok(());
    }

    if users.is_empty() {
        return Ok(());
    }
    output.header(&format!("Registered {} user(s):", users.len()))?;
    for user in users {
        let id = user.id().map(|id| id.to_string()).unwrap_or_default();
        output.success(&format!("{user}  [{id}]"))?;
    }
    Ok(())
}
