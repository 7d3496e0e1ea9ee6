//! Organization creation wizard

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::form::{FieldGroup, FormControl, Rule};
use crate::domain::org::field as org_field;
use crate::domain::policy::{build_confirm_rules, build_password_rules};
use crate::domain::user::{field as user_field, LANGUAGES};
use crate::domain::{
    CreateOrgRequest, CreateUserRequest, DomainError, Gender, Navigator, Notifier,
    OrgProvisioner, PasswordPolicy, PasswordPolicyProvider, WizardState,
};

/// Path segment of the organization detail view
const ORGS_SEGMENT: &str = "orgs";

/// Services the wizard talks to
#[derive(Clone)]
pub struct SetupServices {
    pub policy_provider: Arc<dyn PasswordPolicyProvider>,
    pub provisioner: Arc<dyn OrgProvisioner>,
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

/// Result of a `finish` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The organization was created and navigation was triggered
    Created { org_id: String },
    /// Provisioning failed and the message was shown to the user
    Failed { message: String },
    /// Another submission is still pending, nothing was sent
    AlreadySubmitting,
}

/// Two-step form that creates an organization and its first administrator.
///
/// Step 1 holds the organization fields, step 2 the user fields. Values are
/// submitted as entered; validation state is for presentation only.
pub struct OrgCreateForm {
    services: SetupServices,
    policy: Option<PasswordPolicy>,
    org_form: FieldGroup,
    user_form: FieldGroup,
    wizard: WizardState,
    submitting: AtomicBool,
}

/// Clears the in-flight flag when the submission settles or is dropped
struct SubmitGuard<'a>(&'a AtomicBool);

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for OrgCreateForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrgCreateForm")
            .field("policy", &self.policy)
            .field("wizard", &self.wizard)
            .field("submitting", &self.submitting)
            .finish_non_exhaustive()
    }
}

impl OrgCreateForm {
    /// Fetch the password policy and build both field groups.
    ///
    /// A failed policy fetch is logged and the user fields fall back to
    /// presence checks only.
    pub async fn load(services: SetupServices) -> Self {
        let org_form = Self::org_fields();

        let policy = match services.policy_provider.get_password_complexity_policy().await {
            Ok(policy) => {
                info!(?policy, "Loaded password complexity policy");
                Some(policy)
            }
            Err(e) => {
                warn!("No password complexity policy defined");
                error!(error = %e, "Failed to fetch password complexity policy");
                None
            }
        };

        let user_form = Self::user_fields(policy.as_ref());

        Self {
            services,
            policy,
            org_form,
            user_form,
            wizard: WizardState::default(),
            submitting: AtomicBool::new(false),
        }
    }

    fn org_fields() -> FieldGroup {
        FieldGroup::new(vec![
            FormControl::new(org_field::NAME, vec![Rule::Required]),
            FormControl::new(org_field::DOMAIN, vec![Rule::Required]),
        ])
    }

    fn user_fields(policy: Option<&PasswordPolicy>) -> FieldGroup {
        FieldGroup::new(vec![
            FormControl::new(user_field::USER_NAME, vec![Rule::Required]),
            FormControl::new(user_field::FIRST_NAME, vec![Rule::Required]),
            FormControl::new(user_field::LAST_NAME, vec![Rule::Required]),
            FormControl::new(user_field::EMAIL, vec![Rule::Required]),
            FormControl::new(user_field::GENDER, Vec::new()),
            FormControl::new(user_field::NICK_NAME, Vec::new()),
            FormControl::new(user_field::PREFERRED_LANGUAGE, Vec::new()),
            FormControl::new(user_field::PASSWORD, build_password_rules(policy)),
            FormControl::new(user_field::CONFIRM_PASSWORD, build_confirm_rules(policy)),
        ])
    }

    /// Policy in effect, `None` if the fetch failed
    pub fn policy(&self) -> Option<&PasswordPolicy> {
        self.policy.as_ref()
    }

    pub fn org_form(&self) -> &FieldGroup {
        &self.org_form
    }

    pub fn user_form(&self) -> &FieldGroup {
        &self.user_form
    }

    pub fn set_org_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), DomainError> {
        self.org_form.set_value(name, value)
    }

    pub fn set_user_value(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.user_form.set_value(name, value)
    }

    /// Selectable genders, in display order
    pub fn genders() -> &'static [Gender] {
        &Gender::ALL
    }

    /// Selectable preferred languages
    pub fn languages() -> &'static [&'static str] {
        &LANGUAGES
    }

    // Wizard

    pub fn wizard(&self) -> &WizardState {
        &self.wizard
    }

    pub fn current_step(&self) -> u32 {
        self.wizard.current_step()
    }

    pub fn next(&mut self) {
        self.wizard.next();
    }

    pub fn previous(&mut self) {
        self.wizard.previous();
    }

    /// Check if a submission is in flight
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Assemble both requests from the current field values
    pub fn build_requests(&self) -> (CreateOrgRequest, CreateUserRequest) {
        let org = CreateOrgRequest {
            name: self.org_form.value_or_empty(org_field::NAME),
            domain: self.org_form.value_or_empty(org_field::DOMAIN),
        };

        let user = CreateUserRequest {
            user_name: self.user_form.value_or_empty(user_field::USER_NAME),
            email: self.user_form.value_or_empty(user_field::EMAIL),
            first_name: self.user_form.value_or_empty(user_field::FIRST_NAME),
            last_name: self.user_form.value_or_empty(user_field::LAST_NAME),
            nick_name: self.user_form.value_or_empty(user_field::NICK_NAME),
            gender: Gender::from_form_value(
                self.user_form.value_of(user_field::GENDER).unwrap_or_default(),
            ),
            password: self.user_form.value_or_empty(user_field::PASSWORD),
            preferred_language: self.user_form.value_or_empty(user_field::PREFERRED_LANGUAGE),
        };

        (org, user)
    }

    /// Submit the organization and user.
    ///
    /// On success navigates to the new organization. On failure shows the
    /// server's message and leaves the form untouched. A call made while
    /// another is pending returns immediately.
    pub async fn finish(&self) -> SetupOutcome {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Organization setup already in progress");
            return SetupOutcome::AlreadySubmitting;
        }

        let guard = SubmitGuard(&self.submitting);

        let (org, user) = self.build_requests();
        let result = self.services.provisioner.set_up_org(org, user).await;

        drop(guard);

        let outcome = result.and_then(|response| {
            response.org_id().map(str::to_string).ok_or_else(|| {
                DomainError::remote("provisioning response did not include an organization")
            })
        });

        match outcome {
            Ok(org_id) => {
                info!(org_id = %org_id, "Organization created");
                self.services
                    .navigator
                    .navigate(&[ORGS_SEGMENT.to_string(), org_id.clone()]);
                SetupOutcome::Created { org_id }
            }
            Err(e) => {
                let message = e.to_string();
                error!(error = %message, "Organization setup failed");
                self.services.notifier.show_error(&message);
                SetupOutcome::Failed { message }
            }
        }
    }

    /// Leave the form without submitting
    pub fn close(&self) {
        self.services.navigator.go_back();
    }

    // Field accessors

    pub fn name(&self) -> Option<&FormControl> {
        self.org_form.get(org_field::NAME)
    }

    pub fn domain(&self) -> Option<&FormControl> {
        self.org_form.get(org_field::DOMAIN)
    }

    pub fn user_name(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::USER_NAME)
    }

    pub fn first_name(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::FIRST_NAME)
    }

    pub fn last_name(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::LAST_NAME)
    }

    pub fn email(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::EMAIL)
    }

    pub fn nick_name(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::NICK_NAME)
    }

    pub fn preferred_language(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::PREFERRED_LANGUAGE)
    }

    pub fn gender(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::GENDER)
    }

    pub fn password(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::PASSWORD)
    }

    pub fn confirm_password(&self) -> Option<&FormControl> {
        self.user_form.get(user_field::CONFIRM_PASSWORD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{CharClass, ValidationError};
    use crate::domain::org::MockOrgProvisioner;
    use crate::domain::policy::MockPasswordPolicyProvider;
    use crate::domain::sink::{MockNavigator, MockNotifier};

    fn services(
        policy_provider: Arc<MockPasswordPolicyProvider>,
        provisioner: Arc<MockOrgProvisioner>,
        notifier: MockNotifier,
        navigator: MockNavigator,
    ) -> SetupServices {
        SetupServices {
            policy_provider,
            provisioner,
            notifier: Arc::new(notifier),
            navigator: Arc::new(navigator),
        }
    }

    fn idle_services(policy_provider: MockPasswordPolicyProvider) -> SetupServices {
        services(
            Arc::new(policy_provider),
            Arc::new(MockOrgProvisioner::succeeding("1")),
            MockNotifier::new(),
            MockNavigator::new(),
        )
    }

    fn fill(form: &mut OrgCreateForm) {
        form.set_org_value("name", "Acme").unwrap();
        form.set_org_value("domain", "acme.com").unwrap();
        form.set_user_value("userName", "a").unwrap();
        form.set_user_value("email", "a@x.com").unwrap();
        form.set_user_value("firstName", "Ada").unwrap();
        form.set_user_value("lastName", "Lovelace").unwrap();
        form.set_user_value("password", "abcdefg1").unwrap();
        form.set_user_value("confirmPassword", "abcdefg1").unwrap();
    }

    fn number_policy() -> PasswordPolicy {
        PasswordPolicy {
            min_length: 8,
            has_number: true,
            ..PasswordPolicy::default()
        }
    }

    #[tokio::test]
    async fn test_load_fetches_policy_once() {
        let provider = Arc::new(MockPasswordPolicyProvider::returning(number_policy()));
        let form = OrgCreateForm::load(services(
            provider.clone(),
            Arc::new(MockOrgProvisioner::succeeding("1")),
            MockNotifier::new(),
            MockNavigator::new(),
        ))
        .await;

        assert_eq!(provider.calls(), 1);
        assert_eq!(form.policy(), Some(&number_policy()));
        assert_eq!(
            form.password().unwrap().rules(),
            &[
                Rule::Required,
                Rule::MinLength(8),
                Rule::MatchesPattern(CharClass::Digit)
            ]
        );
    }

    #[tokio::test]
    async fn test_policy_failure_falls_back_to_required() {
        let form = OrgCreateForm::load(idle_services(MockPasswordPolicyProvider::failing())).await;

        assert!(form.policy().is_none());
        assert_eq!(form.password().unwrap().rules(), &[Rule::Required]);
        assert_eq!(
            form.confirm_password().unwrap().rules(),
            &[Rule::Required, Rule::MatchesField("password")]
        );
    }

    #[tokio::test]
    async fn test_password_validation_with_policy() {
        let mut form =
            OrgCreateForm::load(idle_services(MockPasswordPolicyProvider::returning(
                number_policy(),
            )))
            .await;

        form.set_user_value("password", "abc").unwrap();
        let password = form.password().unwrap();
        assert!(!password.valid());
        assert!(password.has_error(&ValidationError::MinLength {
            required: 8,
            actual: 3
        }));
        assert!(password.has_error(&ValidationError::Pattern(CharClass::Digit)));

        form.set_user_value("password", "abcdefg1").unwrap();
        assert!(form.password().unwrap().valid());
    }

    #[tokio::test]
    async fn test_confirm_password_tracks_password() {
        let mut form =
            OrgCreateForm::load(idle_services(MockPasswordPolicyProvider::failing())).await;

        form.set_user_value("password", "abcdefg1").unwrap();
        form.set_user_value("confirmPassword", "abcdefg2").unwrap();
        assert!(form
            .confirm_password()
            .unwrap()
            .has_error(&ValidationError::Mismatch));

        form.set_user_value("password", "abcdefg2").unwrap();
        assert!(form.confirm_password().unwrap().valid());
    }

    #[tokio::test]
    async fn test_required_fields() {
        let form = OrgCreateForm::load(idle_services(MockPasswordPolicyProvider::failing())).await;

        assert!(!form.name().unwrap().valid());
        assert!(!form.domain().unwrap().valid());
        assert!(!form.user_name().unwrap().valid());
        assert!(!form.first_name().unwrap().valid());
        assert!(!form.last_name().unwrap().valid());
        assert!(!form.email().unwrap().valid());
        assert!(form.gender().unwrap().valid());
        assert!(form.nick_name().unwrap().valid());
        assert!(form.preferred_language().unwrap().valid());
        assert!(!form.org_form().valid());
        assert!(!form.user_form().valid());
    }

    #[tokio::test]
    async fn test_wizard_steps_are_clamped() {
        let mut form =
            OrgCreateForm::load(idle_services(MockPasswordPolicyProvider::failing())).await;

        assert_eq!(form.current_step(), 1);
        form.previous();
        assert_eq!(form.current_step(), 1);

        form.next();
        form.next();
        form.next();
        assert_eq!(form.current_step(), 2);
        assert!(form.wizard().is_last_step());

        form.previous();
        assert_eq!(form.current_step(), 1);
    }

    #[tokio::test]
    async fn test_finish_navigates_to_new_org() {
        let provisioner = Arc::new(MockOrgProvisioner::succeeding("42"));

        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|segments| segments.to_vec() == vec!["orgs".to_string(), "42".to_string()])
            .times(1)
            .return_const(());

        let mut notifier = MockNotifier::new();
        notifier.expect_show_error().never();

        let mut form = OrgCreateForm::load(services(
            Arc::new(MockPasswordPolicyProvider::returning(number_policy())),
            provisioner.clone(),
            notifier,
            navigator,
        ))
        .await;
        fill(&mut form);
        form.next();

        let outcome = form.finish().await;
        assert_eq!(
            outcome,
            SetupOutcome::Created {
                org_id: "42".to_string()
            }
        );

        let requests = provisioner.requests().await;
        assert_eq!(requests.len(), 1);
        let (org, user) = &requests[0];
        assert_eq!(org, &CreateOrgRequest::new("Acme", "acme.com"));
        assert_eq!(user.user_name, "a");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.password, "abcdefg1");
        assert_eq!(user.gender, Gender::Unspecified);
        assert_eq!(user.nick_name, "");
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_finish_failure_notifies_and_keeps_state() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_show_error()
            .withf(|message| message == "domain taken")
            .times(1)
            .return_const(());

        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();

        let mut form = OrgCreateForm::load(services(
            Arc::new(MockPasswordPolicyProvider::failing()),
            Arc::new(MockOrgProvisioner::failing("domain taken")),
            notifier,
            navigator,
        ))
        .await;
        fill(&mut form);
        form.next();
        let before = form.org_form().clone();
        let user_before = form.user_form().clone();

        let outcome = form.finish().await;

        assert_eq!(
            outcome,
            SetupOutcome::Failed {
                message: "domain taken".to_string()
            }
        );
        assert_eq!(form.current_step(), 2);
        assert_eq!(form.org_form(), &before);
        assert_eq!(form.user_form(), &user_before);
    }

    #[tokio::test]
    async fn test_finish_submits_invalid_values_as_is() {
        let provisioner = Arc::new(MockOrgProvisioner::succeeding("1"));
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(1).return_const(());

        let mut form = OrgCreateForm::load(services(
            Arc::new(MockPasswordPolicyProvider::returning(number_policy())),
            provisioner.clone(),
            MockNotifier::new(),
            navigator,
        ))
        .await;
        form.set_user_value("password", "abc").unwrap();
        form.set_user_value("gender", "female").unwrap();

        let outcome = form.finish().await;
        assert!(matches!(outcome, SetupOutcome::Created { .. }));

        let requests = provisioner.requests().await;
        let (org, user) = &requests[0];
        assert_eq!(org.name, "");
        assert_eq!(org.domain, "");
        assert_eq!(user.password, "abc");
        assert_eq!(user.gender, Gender::Female);
    }

    #[tokio::test]
    async fn test_finish_without_org_in_response_fails() {
        #[derive(Debug)]
        struct EmptyProvisioner;

        #[async_trait::async_trait]
        impl OrgProvisioner for EmptyProvisioner {
            async fn set_up_org(
                &self,
                _org: CreateOrgRequest,
                _user: CreateUserRequest,
            ) -> Result<crate::domain::OrgSetUpResponse, DomainError> {
                Ok(crate::domain::OrgSetUpResponse::default())
            }
        }

        let mut notifier = MockNotifier::new();
        notifier.expect_show_error().times(1).return_const(());

        let form = OrgCreateForm::load(SetupServices {
            policy_provider: Arc::new(MockPasswordPolicyProvider::failing()),
            provisioner: Arc::new(EmptyProvisioner),
            notifier: Arc::new(notifier),
            navigator: Arc::new(MockNavigator::new()),
        })
        .await;

        let outcome = form.finish().await;
        assert_eq!(
            outcome,
            SetupOutcome::Failed {
                message: "provisioning response did not include an organization".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_second_finish_while_pending_is_rejected() {
        let provisioner = Arc::new(MockOrgProvisioner::succeeding("42"));
        let gate = provisioner.gated().await;

        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(1).return_const(());

        let form = OrgCreateForm::load(services(
            Arc::new(MockPasswordPolicyProvider::failing()),
            provisioner.clone(),
            MockNotifier::new(),
            navigator,
        ))
        .await;

        let first = form.finish();
        tokio::pin!(first);

        // Drive the first submission up to the gate
        tokio::select! {
            _ = &mut first => panic!("first submission should be pending"),
            _ = tokio::task::yield_now() => {}
        }
        assert!(form.is_submitting());

        assert_eq!(form.finish().await, SetupOutcome::AlreadySubmitting);

        gate.notify_one();
        assert_eq!(
            first.await,
            SetupOutcome::Created {
                org_id: "42".to_string()
            }
        );
        assert_eq!(provisioner.requests().await.len(), 1);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_abandoned_finish_allows_resubmit() {
        let provisioner = Arc::new(MockOrgProvisioner::succeeding("42"));
        let gate = provisioner.gated().await;

        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(1).return_const(());

        let form = OrgCreateForm::load(services(
            Arc::new(MockPasswordPolicyProvider::failing()),
            provisioner.clone(),
            MockNotifier::new(),
            navigator,
        ))
        .await;

        let abandoned =
            tokio::time::timeout(std::time::Duration::from_millis(20), form.finish()).await;
        assert!(abandoned.is_err());
        assert!(!form.is_submitting());

        // Stored permit releases the next call
        gate.notify_one();
        assert_eq!(
            form.finish().await,
            SetupOutcome::Created {
                org_id: "42".to_string()
            }
        );
        assert_eq!(provisioner.requests().await.len(), 2);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_close_goes_back() {
        let mut navigator = MockNavigator::new();
        navigator.expect_go_back().times(1).return_const(());
        navigator.expect_navigate().never();

        let form = OrgCreateForm::load(services(
            Arc::new(MockPasswordPolicyProvider::failing()),
            Arc::new(MockOrgProvisioner::succeeding("1")),
            MockNotifier::new(),
            navigator,
        ))
        .await;

        form.close();
    }

    #[tokio::test]
    async fn test_unknown_field_is_rejected() {
        let mut form =
            OrgCreateForm::load(idle_services(MockPasswordPolicyProvider::failing())).await;

        assert!(form.set_org_value("userName", "a").is_err());
        assert!(form.set_user_value("name", "Acme").is_err());
    }

    #[test]
    fn test_selectable_options() {
        assert_eq!(
            OrgCreateForm::genders(),
            &[Gender::Female, Gender::Male, Gender::Unspecified]
        );
        assert_eq!(OrgCreateForm::languages(), &["de", "en"]);
    }
}
