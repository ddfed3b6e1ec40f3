use dioxus::prelude::*;

#[component]
pub fn Input(
    #[props(default = "".to_string())] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = "".to_string())] placeholder: String,
    #[props(default = "".to_string())] value: String,
    #[props(default = None)] maxlength: Option<i64>,
    #[props(default)] oninput: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        input {
            class: "input {class}",
            r#type: "{r#type}",
            placeholder: "{placeholder}",
            value: "{value}",
            maxlength: maxlength,
            oninput: move |evt| oninput.call(evt),
        }
    }
}
