use dioxus::prelude::*;

#[component]
pub fn Card(#[props(default = "".to_string())] class: String, children: Element) -> Element {
    rsx! {
        div { class: "card {class}", {children} }
    }
}

#[component]
pub fn CardHeader(children: Element) -> Element {
    rsx! {
        div { class: "card-header", {children} }
    }
}

#[component]
pub fn CardTitle(children: Element) -> Element {
    rsx! {
        h2 { class: "card-title", {children} }
    }
}

#[component]
pub fn CardDescription(children: Element) -> Element {
    rsx! {
        p { class: "card-description", {children} }
    }
}

#[component]
pub fn CardContent(children: Element) -> Element {
    rsx! {
        div { class: "card-content", {children} }
    }
}
