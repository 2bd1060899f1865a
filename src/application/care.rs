//! Care-assistant services
//!
//! Thin typed use-cases over the care gateway: routines, reminder
//! schedules, journaling and product feedback. Single-shot operations —
//! the transport's retry loop is the only one applied, and failures are
//! scoped to the calling view.

use std::sync::Arc;

use tracing::info;

use crate::domain::care::{
    FeedbackCreateRequest, JournalEntry, JournalEntryCreateRequest, JournalPhoto, Routine,
    RoutineCreateRequest, RoutineItem, Schedule, ScheduleCreateRequest,
};
use crate::domain::error::ApiResult;
use crate::domain::gateway::CareGateway;
use crate::domain::product::Review;

pub struct CareService<G> {
    gateway: Arc<G>,
}

impl<G: CareGateway> CareService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn routines(&self) -> ApiResult<Vec<Routine>> {
        self.gateway.routines().await
    }

    pub async fn routine(&self, routine_id: i64) -> ApiResult<Routine> {
        self.gateway.routine_by_id(routine_id).await
    }

    pub async fn create_routine(&self, title: &str, items: Vec<RoutineItem>) -> ApiResult<Routine> {
        let routine = self
            .gateway
            .create_routine(&RoutineCreateRequest {
                title: title.to_string(),
                items,
            })
            .await?;
        info!("Created routine {} ({})", routine.id, routine.title);
        Ok(routine)
    }

    pub async fn delete_routine(&self, routine_id: i64) -> ApiResult<()> {
        self.gateway.delete_routine(routine_id).await
    }

    pub async fn add_routine_item(&self, routine_id: i64, item: RoutineItem) -> ApiResult<Routine> {
        self.gateway.add_routine_item(routine_id, &item).await
    }

    pub async fn remove_routine_item(&self, routine_id: i64, product_id: i64) -> ApiResult<()> {
        self.gateway.remove_routine_item(routine_id, product_id).await
    }

    pub async fn schedules(&self) -> ApiResult<Vec<Schedule>> {
        self.gateway.schedules().await
    }

    pub async fn schedules_for_product(&self, product_id: i64) -> ApiResult<Vec<Schedule>> {
        self.gateway.schedules_for_product(product_id).await
    }

    pub async fn create_schedule(&self, request: ScheduleCreateRequest) -> ApiResult<Schedule> {
        let schedule = self.gateway.create_schedule(&request).await?;
        info!(
            "Created schedule {} for product {}",
            schedule.id, schedule.product_id
        );
        Ok(schedule)
    }

    pub async fn delete_schedule(&self, schedule_id: i64) -> ApiResult<()> {
        self.gateway.delete_schedule(schedule_id).await
    }

    pub async fn journal_entries(&self, user_id: i64) -> ApiResult<Vec<JournalEntry>> {
        self.gateway.journal_entries(user_id).await
    }

    pub async fn create_journal_entry(
        &self,
        request: JournalEntryCreateRequest,
    ) -> ApiResult<JournalEntry> {
        self.gateway.create_journal_entry(&request).await
    }

    pub async fn delete_journal_entry(&self, entry_id: i64) -> ApiResult<()> {
        self.gateway.delete_journal_entry(entry_id).await
    }

    pub async fn upload_journal_photo(
        &self,
        entry_id: i64,
        image: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<JournalPhoto> {
        self.gateway.upload_journal_photo(entry_id, image, file_name).await
    }

    pub async fn submit_feedback(&self, request: FeedbackCreateRequest) -> ApiResult<Review> {
        self.gateway.submit_feedback(&request).await
    }
}
