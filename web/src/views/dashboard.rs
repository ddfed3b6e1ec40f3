//! Dashboard: the protected landing page. Farm records are simple
//! fetch-and-render glue; identity is the interesting part and lives in the
//! header and the guard.

use dioxus::prelude::*;

use api::records::ProjectInfo;
use ui::components::{Card, CardContent, CardHeader, CardTitle};
use ui::{use_auth, use_gateway, use_session_store, FarmHeader, Protected};

use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    rsx! {
        Protected {
            DashboardInner {}
        }
    }
}

#[component]
fn DashboardInner() -> Element {
    let auth = use_auth();
    let gateway = use_gateway();
    let store = use_session_store();

    let projects = use_resource(move || {
        let gateway = gateway.clone();
        let store = store.clone();
        async move {
            let Some(session) = auth() else {
                return Vec::<ProjectInfo>::new();
            };
            match gateway.list_projects(&session.token).await {
                Ok(projects) => projects,
                Err(api::GatewayError::InvalidCredentials) => {
                    // The backend no longer honors this token.
                    store.invalidate();
                    Vec::new()
                }
                Err(err) => {
                    tracing::warn!(%err, "failed to load projects");
                    Vec::new()
                }
            }
        }
    });

    rsx! {
        div {
            class: "app-shell",
            FarmHeader {}

            main {
                class: "dashboard",

                section { class: "quick-actions",
                    Card {
                        CardHeader { CardTitle { "Plant Farming" } }
                        CardContent {
                            p { "Track crops, planting events, and fertility spreads." }
                            Link { class: "btn btn-primary", to: Route::PlantFarming {}, "Open" }
                        }
                    }
                    Card {
                        CardHeader { CardTitle { "Animal Farming" } }
                        CardContent {
                            p { "Track animal groups across your projects." }
                            Link { class: "btn btn-primary", to: Route::AnimalFarming {}, "Open" }
                        }
                    }
                }

                section { class: "projects",
                    Card {
                        CardHeader { CardTitle { "Your Projects" } }
                        CardContent {
                            {match projects() {
                                Some(list) if list.is_empty() => rsx! {
                                    p { class: "hint", "No projects yet. Create one from the farming pages." }
                                },
                                Some(list) => rsx! {
                                    ul { class: "project-list",
                                        for (id, project) in list.into_iter().map(|p| (p.id.as_string(), p)) {
                                            li { key: "{id}",
                                                span { class: "project-name", "{project.name}" }
                                                if let Some(kind) = &project.kind {
                                                    span { class: "project-kind", "{kind}" }
                                                }
                                            }
                                        }
                                    }
                                },
                                None => rsx! { p { class: "hint", "Loading projects..." } },
                            }}
                        }
                    }
                }
            }
        }
    }
}
