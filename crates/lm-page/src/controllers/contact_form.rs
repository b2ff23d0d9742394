//! Hero contact form
//!
//! Client-side validation of the contact field, submission tracking and the
//! success toast. The form never navigates; submit is always prevented.

use super::toast;
use crate::listeners::{Handler, ListenerRegistry};
use crate::page::PageContext;
use crate::query::{select, select_all, select_in_document};
use crate::tracker::{payload, Payload};
use crate::validator::is_valid_contact;
use lm_dom::{forms, DomEvent, EventType, FormData, NodeId};
use serde_json::Value;

pub const FORM_START_EVENT: &str = "form_start";
pub const FORM_FAIL_EVENT: &str = "form_submit_fail";
pub const FORM_SUCCESS_EVENT: &str = "form_submit_success";

const FORM: &str = "#hero-form";
const CONTACT_ERROR: &str = "[data-error-for='contact']";
const CONTACT_FIELD: &str = "#contact-info";
const FOCUS_FIELDS: &str = "input, select";
const CONTACT_NAME: &str = "contact";

#[derive(Debug, Clone)]
pub struct ContactForm {
    form: NodeId,
    error: Option<NodeId>,
    contact: Option<NodeId>,
}

impl ContactForm {
    pub fn setup(ctx: &mut PageContext, listeners: &mut ListenerRegistry) -> Option<Self> {
        let form = select_in_document(&ctx.document, FORM)?;
        let error = select(&ctx.document, CONTACT_ERROR, form);
        let contact = select(&ctx.document, CONTACT_FIELD, form);

        listeners.add(form, EventType::Submit, Handler::FormSubmit);
        if let Some(contact) = contact {
            listeners.add(contact, EventType::Blur, Handler::ContactBlur);
        }
        let fields = select_all(&ctx.document, FOCUS_FIELDS, form);
        for &field in &fields {
            listeners.add(field, EventType::Focus, Handler::FieldFocus);
        }

        tracing::debug!(fields = fields.len(), "contact form bound");
        Some(Self { form, error, contact })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn on_submit(&self, ctx: &mut PageContext, event: &mut DomEvent) {
        event.prevent_default();

        let data = FormData::from_form(&ctx.document.tree, self.form);
        let contact = data.get(CONTACT_NAME).unwrap_or_default().trim();

        if !is_valid_contact(contact) {
            let message = ctx.config.contact_error.clone();
            self.set_error(ctx, &message);
            ctx.tracker
                .track(FORM_FAIL_EVENT, payload([("reason", "invalid_contact")]));
            return;
        }

        self.set_error(ctx, "");
        // Later duplicates overwrite earlier ones, like Object.fromEntries
        let fields: Payload = data
            .entries()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();
        ctx.tracker.track(FORM_SUCCESS_EVENT, fields);

        forms::reset_form(&mut ctx.document.tree, self.form);
        let message = ctx.config.toast_message.clone();
        toast::show(ctx, &message);
    }

    /// Early inline feedback; an empty field clears the error
    pub fn on_contact_blur(&self, ctx: &mut PageContext) {
        let Some(contact) = self.contact else { return };
        let value = forms::control_value(&ctx.document.tree, contact);
        let value = value.trim();

        if !value.is_empty() && !is_valid_contact(value) {
            let message = ctx.config.contact_error.clone();
            self.set_error(ctx, &message);
        } else {
            self.set_error(ctx, "");
        }
    }

    pub fn on_field_focus(&self, ctx: &mut PageContext, field: NodeId) {
        let name = ctx
            .document
            .tree
            .get_attribute(field, "name")
            .unwrap_or_default()
            .to_string();
        ctx.tracker.track(FORM_START_EVENT, payload([("field", name.as_str())]));
    }

    fn set_error(&self, ctx: &mut PageContext, message: &str) {
        if let Some(error) = self.error {
            ctx.document.tree.set_text_content(error, message);
        }
    }
}
