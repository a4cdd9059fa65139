//! Resource operations, each a fixed endpoint, method and optional body

use common::{
    Endpoint, KeyValueStore,
    models::{
        AcknowledgeReminderRequest, AuthResponse, CreateMedicationRequest, CreateReminderRequest,
        HealthResponse, LoginRequest, Medication, MessageResponse, RegisterRequest, Reminder,
        UpdateMedicationRequest, UpdateReminderRequest, User,
    },
};
use reqwest::Method;
use tracing::info;
use uuid::Uuid;

use crate::{
    api::{ApiClient, RequestOptions},
    error::ClientResult,
};

impl<S: KeyValueStore> ApiClient<S> {
    /// Log in and persist the returned token
    pub async fn login(&self, credentials: &LoginRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .request(
                Method::POST,
                &Endpoint::Login.path(),
                Some(credentials),
                RequestOptions::ANONYMOUS,
            )
            .await?;

        self.tokens.set(&response.token).await?;
        info!("Logged in as {}", response.user.email);
        Ok(response)
    }

    /// Register and persist the returned token
    pub async fn register(&self, registration: &RegisterRequest) -> ClientResult<AuthResponse> {
        let response: AuthResponse = self
            .request(
                Method::POST,
                &Endpoint::Register.path(),
                Some(registration),
                RequestOptions::ANONYMOUS,
            )
            .await?;

        self.tokens.set(&response.token).await?;
        info!("Registered {}", response.user.email);
        Ok(response)
    }

    /// Log out
    ///
    /// The stored token is removed whatever the server answers; the server's
    /// answer is still returned.
    pub async fn logout(&self) -> ClientResult<MessageResponse> {
        let result = self.call(Method::POST, Endpoint::Logout).await;
        self.tokens.clear().await?;
        info!("Logged out");
        result
    }

    pub async fn get_current_user(&self) -> ClientResult<User> {
        self.call(Method::GET, Endpoint::CurrentUser).await
    }

    pub async fn get_medications(&self) -> ClientResult<Vec<Medication>> {
        self.call(Method::GET, Endpoint::Medications).await
    }

    pub async fn get_medication(&self, id: Uuid) -> ClientResult<Medication> {
        self.call(Method::GET, Endpoint::Medication(id)).await
    }

    pub async fn create_medication(
        &self,
        medication: &CreateMedicationRequest,
    ) -> ClientResult<Medication> {
        self.call_with(Method::POST, Endpoint::Medications, medication)
            .await
    }

    pub async fn update_medication(
        &self,
        id: Uuid,
        update: &UpdateMedicationRequest,
    ) -> ClientResult<Medication> {
        self.call_with(Method::PUT, Endpoint::Medication(id), update)
            .await
    }

    pub async fn delete_medication(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.call(Method::DELETE, Endpoint::Medication(id)).await
    }

    pub async fn get_reminders(&self) -> ClientResult<Vec<Reminder>> {
        self.call(Method::GET, Endpoint::Reminders).await
    }

    pub async fn get_reminder(&self, id: Uuid) -> ClientResult<Reminder> {
        self.call(Method::GET, Endpoint::Reminder(id)).await
    }

    pub async fn create_reminder(&self, reminder: &CreateReminderRequest) -> ClientResult<Reminder> {
        self.call_with(Method::POST, Endpoint::Reminders, reminder)
            .await
    }

    pub async fn update_reminder(
        &self,
        id: Uuid,
        update: &UpdateReminderRequest,
    ) -> ClientResult<Reminder> {
        self.call_with(Method::PUT, Endpoint::Reminder(id), update)
            .await
    }

    pub async fn delete_reminder(&self, id: Uuid) -> ClientResult<MessageResponse> {
        self.call(Method::DELETE, Endpoint::Reminder(id)).await
    }

    /// Record that a reminder was taken (or skipped)
    pub async fn acknowledge_reminder(
        &self,
        id: Uuid,
        acknowledgement: &AcknowledgeReminderRequest,
    ) -> ClientResult<Reminder> {
        self.call_with(
            Method::POST,
            Endpoint::AcknowledgeReminder(id),
            acknowledgement,
        )
        .await
    }

    pub async fn health(&self) -> ClientResult<HealthResponse> {
        self.request::<(), _>(
            Method::GET,
            &Endpoint::Health.path(),
            None,
            RequestOptions::ANONYMOUS,
        )
        .await
    }
}
