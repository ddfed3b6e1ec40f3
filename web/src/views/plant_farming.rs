use dioxus::prelude::*;

use api::records::{NewProject, ProjectInfo};
use auth::Notice;
use ui::components::{Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, Input};
use ui::{push_notice, use_auth, use_gateway, use_notices, use_session_store, FarmHeader, Protected};

#[component]
pub fn PlantFarming() -> Element {
    rsx! {
        Protected {
            PlantFarmingInner {}
        }
    }
}

#[component]
fn PlantFarmingInner() -> Element {
    let auth = use_auth();
    let gateway = use_gateway();
    let store = use_session_store();
    let mut notices = use_notices();

    let mut project_name = use_signal(String::new);
    let mut crop = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let mut projects = use_resource({
        let gateway = gateway.clone();
        let store = store.clone();
        move || {
            let gateway = gateway.clone();
            let store = store.clone();
            async move {
                let Some(session) = auth() else {
                    return Vec::<ProjectInfo>::new();
                };
                match gateway.list_projects(&session.token).await {
                    Ok(list) => list
                        .into_iter()
                        .filter(|p| p.kind.as_deref() == Some("plant"))
                        .collect(),
                    Err(api::GatewayError::InvalidCredentials) => {
                        store.invalidate();
                        Vec::new()
                    }
                    Err(err) => {
                        tracing::warn!(%err, "failed to load plant projects");
                        Vec::new()
                    }
                }
            }
        }
    });

    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let gateway = gateway.clone();
        spawn(async move {
            let Some(session) = auth.peek().clone() else {
                return;
            };
            let name = project_name().trim().to_string();
            let crop_name = crop().trim().to_string();
            if name.is_empty() || crop_name.is_empty() {
                push_notice(
                    &mut notices,
                    Notice::error("Missing details", "Enter a project name and a crop."),
                );
                return;
            }

            saving.set(true);
            let created = gateway
                .create_project(
                    &session.token,
                    &NewProject {
                        name,
                        project_type: "plant".to_string(),
                    },
                )
                .await;
            let result = match created {
                Ok(project) => {
                    gateway
                        .create_planting_event(&session.token, &project.id.as_string(), &crop_name)
                        .await
                        .map(|_| ())
                }
                Err(err) => Err(err),
            };
            saving.set(false);

            match result {
                Ok(()) => {
                    project_name.set(String::new());
                    crop.set(String::new());
                    push_notice(
                        &mut notices,
                        Notice::success("Project created", "Your planting project was saved."),
                    );
                    projects.restart();
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to create planting project");
                    push_notice(
                        &mut notices,
                        Notice::error("Could not save project", "Please try again."),
                    );
                }
            }
        });
    };

    rsx! {
        div {
            class: "app-shell",
            FarmHeader {}

            main {
                class: "dashboard",
                Card {
                    CardHeader { CardTitle { "New Planting Project" } }
                    CardContent {
                        form {
                            onsubmit: handle_create,
                            class: "record-form",
                            Input {
                                placeholder: "Project name",
                                value: project_name(),
                                oninput: move |evt: FormEvent| project_name.set(evt.value()),
                            }
                            Input {
                                placeholder: "Crop",
                                value: crop(),
                                oninput: move |evt: FormEvent| crop.set(evt.value()),
                            }
                            Button {
                                variant: ButtonVariant::Primary,
                                r#type: "submit",
                                disabled: saving(),
                                if saving() { "Saving..." } else { "Create" }
                            }
                        }
                    }
                }

                Card {
                    CardHeader { CardTitle { "Plant Projects" } }
                    CardContent {
                        {match projects() {
                            Some(list) if list.is_empty() => rsx! {
                                p { class: "hint", "No plant projects yet." }
                            },
                            Some(list) => rsx! {
                                ul { class: "project-list",
                                    for (id, project) in list.into_iter().map(|p| (p.id.as_string(), p)) {
                                        li { key: "{id}", "{project.name}" }
                                    }
                                }
                            },
                            None => rsx! { p { class: "hint", "Loading..." } },
                        }}
                    }
                }
            }
        }
    }
}
