//! Create command - runs the setup wizard non-interactively

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::form::FieldGroup;
use crate::domain::org::field as org_field;
use crate::domain::user::field as user_field;
use crate::infrastructure::setup::{
    LogNotifier, OrgCreateForm, RecordingNavigator, SetupOutcome, SetupServices,
};

use super::admin_client;

/// Arguments for the create command
#[derive(Args, Clone, Debug)]
pub struct CreateArgs {
    /// Organization name
    #[arg(long)]
    pub org_name: String,

    /// Organization domain
    #[arg(long)]
    pub org_domain: String,

    /// Login name of the first administrator
    #[arg(long)]
    pub user_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub nick_name: Option<String>,

    /// female, male or unspecified
    #[arg(long)]
    pub gender: Option<String>,

    /// Preferred language (de, en)
    #[arg(long)]
    pub preferred_language: Option<String>,

    #[arg(long)]
    pub password: String,

    /// Defaults to the password
    #[arg(long)]
    pub confirm_password: Option<String>,

    /// Refuse to submit while any field fails validation
    #[arg(long)]
    pub strict: bool,
}

/// Fill both wizard steps from the arguments, submit, and print the
/// navigation target of the new organization
pub async fn run(config: &AppConfig, args: CreateArgs) -> anyhow::Result<()> {
    let target = create_org(config, args).await?;
    println!("{}", target);
    Ok(())
}

async fn create_org(config: &AppConfig, args: CreateArgs) -> anyhow::Result<String> {
    let client = Arc::new(admin_client(config)?);
    let navigator = Arc::new(RecordingNavigator::new());

    let mut form = OrgCreateForm::load(SetupServices {
        policy_provider: client.clone(),
        provisioner: client,
        notifier: Arc::new(LogNotifier),
        navigator: navigator.clone(),
    })
    .await;

    fill_org_step(&mut form, &args)?;
    let org_valid = report_errors(form.org_form());
    form.next();

    fill_user_step(&mut form, &args)?;
    let user_valid = report_errors(form.user_form());

    if args.strict && !(org_valid && user_valid) {
        bail!("form is invalid, not submitting");
    }

    info!(step = form.current_step(), "Submitting organization setup");

    match form.finish().await {
        SetupOutcome::Created { org_id } => Ok(navigator
            .last()
            .map(|segments| segments.join("/"))
            .unwrap_or_else(|| format!("orgs/{}", org_id))),
        SetupOutcome::Failed { message } => bail!("organization setup failed: {}", message),
        SetupOutcome::AlreadySubmitting => bail!("organization setup already in progress"),
    }
}

fn fill_org_step(form: &mut OrgCreateForm, args: &CreateArgs) -> anyhow::Result<()> {
    form.set_org_value(org_field::NAME, &args.org_name)?;
    form.set_org_value(org_field::DOMAIN, &args.org_domain)?;
    Ok(())
}

fn fill_user_step(form: &mut OrgCreateForm, args: &CreateArgs) -> anyhow::Result<()> {
    let optional = |value: &Option<String>| value.clone().unwrap_or_default();

    form.set_user_value(user_field::USER_NAME, &args.user_name)?;
    form.set_user_value(user_field::FIRST_NAME, &args.first_name)?;
    form.set_user_value(user_field::LAST_NAME, &args.last_name)?;
    form.set_user_value(user_field::EMAIL, &args.email)?;
    form.set_user_value(user_field::NICK_NAME, optional(&args.nick_name))?;
    form.set_user_value(user_field::GENDER, optional(&args.gender))?;
    form.set_user_value(
        user_field::PREFERRED_LANGUAGE,
        optional(&args.preferred_language),
    )?;
    form.set_user_value(user_field::PASSWORD, &args.password)?;
    form.set_user_value(
        user_field::CONFIRM_PASSWORD,
        args.confirm_password
            .clone()
            .unwrap_or_else(|| args.password.clone()),
    )
    .context("setting password confirmation")?;

    if let Some(language) = &args.preferred_language {
        if !OrgCreateForm::languages().contains(&language.as_str()) {
            warn!(language = %language, "Preferred language is not one of the offered languages");
        }
    }

    Ok(())
}

/// Log every failing field, returns whether the group is valid
fn report_errors(group: &FieldGroup) -> bool {
    for (field, errors) in group.errors() {
        for error in errors {
            warn!(field = %field, "{}", error);
        }
    }
    group.valid()
}
