//! Profile collection and the linear welcome → profile → analysis flow.

use thiserror::Error;

use crate::models::{AnalysisRequest, UserProfile};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("name is required")] MissingName,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("expected step {expected:?}, session is at {actual:?}")]
    OutOfOrder { expected: Step, actual: Step },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    MedicalConditions,
    Religion,
    WorkEnvironment,
}

/// In-memory form state. Values are stored exactly as entered.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    data: UserProfile,
}

impl ProfileForm {
    pub fn new() -> Self { Self::default() }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match field {
            ProfileField::Name => self.data.name = value,
            ProfileField::MedicalConditions => self.data.medical_conditions = value,
            ProfileField::Religion => self.data.religion = value,
            ProfileField::WorkEnvironment => self.data.work_environment = value,
        }
        self
    }

    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.data.name,
            ProfileField::MedicalConditions => &self.data.medical_conditions,
            ProfileField::Religion => &self.data.religion,
            ProfileField::WorkEnvironment => &self.data.work_environment,
        }
    }

    /// Hands the current form state to `on_complete`. The callback is not
    /// invoked when the required name is empty.
    pub fn submit<F>(self, on_complete: F) -> Result<(), ProfileError>
    where
        F: FnOnce(UserProfile),
    {
        if self.data.name.is_empty() {
            return Err(ProfileError::MissingName);
        }
        tracing::debug!("📝 Profile submitted for {}", self.data.name);
        on_complete(self.data);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Welcome,
    Profile,
    Analysis,
}

#[derive(Debug, Clone)]
pub struct Session {
    step: Step,
    profile: Option<UserProfile>,
}

impl Default for Session {
    fn default() -> Self { Self { step: Step::Welcome, profile: None } }
}

impl Session {
    pub fn new() -> Self { Self::default() }

    pub fn step(&self) -> Step { self.step }

    pub fn profile(&self) -> Option<&UserProfile> { self.profile.as_ref() }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect(Step::Welcome)?;
        self.step = Step::Profile;
        Ok(())
    }

    pub fn complete_profile(&mut self, profile: UserProfile) -> Result<(), SessionError> {
        self.expect(Step::Profile)?;
        self.profile = Some(profile);
        self.step = Step::Analysis;
        Ok(())
    }

    /// Builds the payload for the analysis endpoint from the stored profile.
    pub fn analysis_request(
        &self,
        image_data: Option<String>,
        ingredients: Option<String>,
    ) -> Result<AnalysisRequest, SessionError> {
        self.expect(Step::Analysis)?;
        let user_profile = self.profile.clone().unwrap_or_default();
        Ok(AnalysisRequest {
            image_data: image_data.filter(|s| !s.is_empty()),
            user_profile,
            ingredients: ingredients.filter(|s| !s.is_empty()),
        })
    }

    fn expect(&self, expected: Step) -> Result<(), SessionError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(SessionError::OutOfOrder {
                expected,
                actual: self.step,
            })
        }
    }
}
