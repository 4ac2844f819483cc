// gui/components/toast_stack.rs
use crate::automation::ToastKind;
use crate::gui::toasts::ActiveToast;
use dioxus::prelude::*;

const INFO_STYLE: &str = "background: rgba(34,34,34,0.9); color:#fff; padding:6px 10px; border-radius:8px; font-size:0.85em; border:1px solid rgba(255,255,255,0.2);";
const ALERT_STYLE: &str = "background: #bb2222; color:#fff; padding:6px 10px; border-radius:8px; font-size:0.85em; font-weight:600; border:1px solid #ff6262;";

fn toast_style(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Alert => ALERT_STYLE,
        ToastKind::Info => INFO_STYLE,
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct ToastStackProps {
    pub toasts: Vec<ActiveToast>,
}

#[component]
pub fn ToastStack(props: ToastStackProps) -> Element {
    rsx! {
        div { style: "display:flex; flex-direction:column; gap:6px;",
            for toast in props.toasts.iter() {
                div {
                    key: "{toast.id}",
                    style: toast_style(toast.kind),
                    "{toast.text}"
                }
            }
        }
    }
}
