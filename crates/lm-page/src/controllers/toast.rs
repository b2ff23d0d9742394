//! Transient confirmation toast

use crate::page::PageContext;
use crate::query::select_in_document;
use crate::timers::TimerTask;
use lm_dom::NodeId;

const TOAST: &str = "#form-toast";
const SHOW_CLASS: &str = "show";

/// Show `message` and schedule its dismissal; no toast element, no-op
pub fn show(ctx: &mut PageContext, message: &str) {
    let Some(toast) = select_in_document(&ctx.document, TOAST) else {
        return;
    };
    ctx.document.tree.set_text_content(toast, message);
    ctx.document.tree.add_class(toast, SHOW_CLASS);
    ctx.timers
        .schedule(ctx.config.toast_duration(), TimerTask::HideToast(toast));
}

pub fn hide(ctx: &mut PageContext, toast: NodeId) {
    ctx.document.tree.remove_class(toast, SHOW_CLASS);
}
