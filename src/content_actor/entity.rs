//! [`ActorEntity`] implementations for [`Service`], [`Faq`] and [`AuditLog`].

use crate::content_actor::ContentError;
use crate::model::{
    AuditLog, AuditLogCreate, AuditLogId, Faq, FaqCreate, FaqId, FaqUpdate, Service,
    ServiceCreate, ServiceId, ServiceUpdate,
};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for Service {
    type Id = ServiceId;
    type Create = ServiceCreate;
    type Update = ServiceUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ContentError;

    fn from_create_params(id: ServiceId, params: ServiceCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(ContentError::ValidationError("service name must not be empty".into()));
        }
        Ok(Self {
            id,
            tenant_id: params.tenant_id,
            name: params.name,
            duration_minutes: params.duration_minutes,
            is_active: true,
        })
    }

    async fn on_update(&mut self, update: ServiceUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(duration) = update.duration_minutes {
            self.duration_minutes = duration;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Faq {
    type Id = FaqId;
    type Create = FaqCreate;
    type Update = FaqUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ContentError;

    fn from_create_params(id: FaqId, params: FaqCreate) -> Result<Self, Self::Error> {
        if params.question.trim().is_empty() || params.answer.trim().is_empty() {
            return Err(ContentError::ValidationError(
                "question and answer are required".into(),
            ));
        }
        Ok(Self {
            id,
            tenant_id: params.tenant_id,
            question: params.question,
            answer: params.answer,
            category: params.category,
        })
    }

    async fn on_update(&mut self, update: FaqUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(question) = update.question {
            self.question = question;
        }
        if let Some(answer) = update.answer {
            self.answer = answer;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for AuditLog {
    type Id = AuditLogId;
    type Create = AuditLogCreate;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = ContentError;

    fn from_create_params(id: AuditLogId, params: AuditLogCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            tenant_id: params.tenant_id,
            action: params.action,
            actor: params.actor,
            details: params.details,
            created_at: Utc::now(),
        })
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), Self::Error> {
        Err(ContentError::Immutable)
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Self::Error> {
        Ok(())
    }
}
