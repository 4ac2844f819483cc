// gui/components/hud.rs
use dioxus::prelude::*;

#[derive(Props, PartialEq, Clone)]
pub struct HudProps {
    pub text: String,
}

#[component]
pub fn Hud(props: HudProps) -> Element {
    rsx! {
        div { style: "background: rgba(20,20,20,0.88); color:#48ff9b; padding:6px 10px; border-radius:8px; font-family: 'Consolas', 'Menlo', monospace; font-size:0.95em; border:1px solid rgba(255,255,255,0.2);",
            "{props.text}"
        }
    }
}
