use dioxus::prelude::*;
use dioxus_logger::tracing::{error, warn};
use shared_types::{Field, Mode, PublishedReference, Record, SyncController};

use crate::api::publish_dataset;
use crate::interop::download_file;
use crate::styles::DESIGNER_STYLES;

/// Which serialization the preview card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTab {
    Json,
    Jsonl,
}

impl PreviewTab {
    pub const ALL: [PreviewTab; 2] = [PreviewTab::Json, PreviewTab::Jsonl];

    pub fn label(self) -> &'static str {
        match self {
            PreviewTab::Json => "JSON",
            PreviewTab::Jsonl => "JSONL",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum PublishState {
    Idle,
    Publishing,
    Failed(String),
}

pub fn field_count_label(count: usize) -> String {
    format!("Field Count: {count}")
}

pub fn publish_button_label(publishing: bool) -> &'static str {
    if publishing {
        "Publishing..."
    } else {
        "Publish Training Data"
    }
}

/// Apply an accepted mutation and resync the editable JSON draft with it.
fn commit(
    mut controller: Signal<SyncController>,
    mut json_draft: Signal<String>,
    mut json_error: Signal<Option<String>>,
    mutate: impl FnOnce(&mut SyncController),
) {
    {
        let mut guard = controller.write();
        mutate(&mut guard);
    }
    json_draft.set(controller.read().pretty_json().to_string());
    json_error.set(None);
}

#[component]
pub fn DesignerApp() -> Element {
    let mut controller = use_signal(SyncController::default);
    let mut json_draft = use_signal(|| SyncController::default().pretty_json().to_string());
    let mut json_error = use_signal(|| None::<String>);
    let mut active_tab = use_signal(|| PreviewTab::Json);
    let mut published = use_signal(|| None::<PublishedReference>);
    let mut publish_state = use_signal(|| PublishState::Idle);
    let mut confirm_reset = use_signal(|| false);

    let mode = controller.read().mode();
    let records = controller.read().records().to_vec();
    let record_count = records.len();
    let jsonl = controller.read().jsonl().to_string();

    let on_mode_change = move |e: FormEvent| match e.value().parse::<Mode>() {
        Ok(next) => commit(controller, json_draft, json_error, |c| c.set_mode(next)),
        Err(err) => warn!("Ignoring mode change: {err}"),
    };

    let on_json_input = move |e: FormEvent| {
        let text = e.value();
        let result = controller.write().apply_raw_json(&text);
        match result {
            Ok(()) => {
                json_draft.set(controller.read().pretty_json().to_string());
                json_error.set(None);
            }
            Err(err) => {
                // The model keeps its last valid state; only the draft holds the edit.
                json_draft.set(text);
                json_error.set(Some(err.to_string()));
            }
        }
    };

    let on_download = move |_| {
        let file = controller.read().download_file();
        if let Err(e) = download_file(&file) {
            error!("Download failed: {:?}", e);
        }
    };

    let on_publish = move |_| {
        let jsonl = controller.read().jsonl().to_string();
        publish_state.set(PublishState::Publishing);
        spawn(async move {
            match publish_dataset(&jsonl).await {
                Ok(reference) => {
                    published.set(Some(reference));
                    publish_state.set(PublishState::Idle);
                }
                Err(e) => {
                    error!("Error publishing data: {}", e);
                    publish_state.set(PublishState::Failed(e));
                }
            }
        });
    };

    rsx! {
        style { {DESIGNER_STYLES} }
        div { class: "designer-shell",
            header { class: "designer-header", "✨ TuneUp - training data generator" }
            main { class: "designer-main",
                p { class: "designer-intro",
                    "Use the designer or edit the JSON directly to generate a JSONL file that you can use as training data to fine tune large language models (LLM)."
                }
                div { class: "designer-grid",
                    // Designer
                    div { class: "card",
                        div { class: "card-header",
                            h3 { class: "card-title",
                                "Designer"
                                button {
                                    class: "field-count",
                                    title: "Reset all fields",
                                    onclick: move |_| confirm_reset.set(true),
                                    "{field_count_label(record_count)} 💣"
                                }
                            }
                            select {
                                value: "{mode}",
                                onchange: on_mode_change,
                                for option_mode in Mode::ALL {
                                    option {
                                        value: "{option_mode}",
                                        selected: option_mode == mode,
                                        "{option_mode.label()}"
                                    }
                                }
                            }
                        }
                        div { class: "card-body",
                            for (index, record) in records.into_iter().enumerate() {
                                RecordCard {
                                    key: "{index}",
                                    index,
                                    record,
                                    on_edit: move |(index, field, value): (usize, Field, String)| {
                                        commit(controller, json_draft, json_error, |c| {
                                            if !c.edit_field(index, field, value) {
                                                warn!("Ignoring edit of {field} on record {index}");
                                            }
                                        })
                                    },
                                    on_remove: move |index: usize| {
                                        commit(controller, json_draft, json_error, |c| {
                                            if !c.remove_record(index) {
                                                warn!("Ignoring removal of record {index}");
                                            }
                                        })
                                    },
                                }
                            }
                        }
                        div { class: "card-footer",
                            button {
                                class: "button ghost",
                                onclick: move |_| commit(controller, json_draft, json_error, |c| c.add_record()),
                                "➕ Add New"
                            }
                        }
                    }

                    // Preview
                    div { class: "card",
                        div { class: "card-body",
                            div { class: "tab-list",
                                for tab in PreviewTab::ALL {
                                    button {
                                        class: if active_tab() == tab { "tab active" } else { "tab" },
                                        onclick: move |_| active_tab.set(tab),
                                        "{tab.label()}"
                                    }
                                }
                            }
                            match active_tab() {
                                PreviewTab::Json => rsx! {
                                    textarea {
                                        class: "preview-text",
                                        value: "{json_draft}",
                                        oninput: on_json_input,
                                    }
                                    if let Some(err) = json_error() {
                                        p { class: "preview-error", "{err}. The dataset was not changed." }
                                    }
                                },
                                PreviewTab::Jsonl => rsx! {
                                    textarea {
                                        class: "preview-text",
                                        readonly: true,
                                        value: "{jsonl}",
                                    }
                                },
                            }
                            div { class: "actions",
                                button { class: "button outline", onclick: on_download, "Download JSONL" }
                                button {
                                    class: "button",
                                    onclick: on_publish,
                                    "{publish_button_label(publish_state() == PublishState::Publishing)}"
                                }
                            }
                            if let PublishState::Failed(message) = publish_state() {
                                p { class: "preview-error", "Publishing failed: {message}" }
                            }
                            if let Some(reference) = published() {
                                PublishedBanner { reference }
                            }
                        }
                    }
                }
            }
            if confirm_reset() {
                ResetDialog {
                    on_cancel: move |_| confirm_reset.set(false),
                    on_confirm: move |_| {
                        commit(controller, json_draft, json_error, |c| c.reset_all());
                        confirm_reset.set(false);
                    },
                }
            }
        }
    }
}

#[component]
fn RecordCard(
    index: usize,
    record: Record,
    on_edit: EventHandler<(usize, Field, String)>,
    on_remove: EventHandler<usize>,
) -> Element {
    let number = index + 1;

    rsx! {
        div { class: "record-card",
            div { class: "record-gutter",
                span { class: "record-number", "{number}" }
                button {
                    class: "record-remove",
                    title: "Remove record {number}",
                    onclick: move |_| on_remove.call(index),
                    "🗑"
                }
            }
            div { class: "record-fields",
                match record {
                    Record::Instruction { prompt, completion } => rsx! {
                        input {
                            r#type: "text",
                            name: "prompt",
                            placeholder: Field::Prompt.placeholder(),
                            value: "{prompt}",
                            oninput: move |e: FormEvent| on_edit.call((index, Field::Prompt, e.value())),
                        }
                        input {
                            r#type: "text",
                            name: "completion",
                            placeholder: Field::Completion.placeholder(),
                            value: "{completion}",
                            oninput: move |e: FormEvent| on_edit.call((index, Field::Completion, e.value())),
                        }
                    },
                    Record::Autocomplete { text } => rsx! {
                        textarea {
                            name: "text",
                            placeholder: Field::Text.placeholder(),
                            value: "{text}",
                            oninput: move |e: FormEvent| on_edit.call((index, Field::Text, e.value())),
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn PublishedBanner(reference: PublishedReference) -> Element {
    rsx! {
        div { class: "published-banner",
            strong { "✨ Published URL" }
            div {
                a {
                    href: "{reference}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "{reference}"
                }
            }
        }
    }
}

/// Confirmation gate for the irreversible reset.
#[component]
fn ResetDialog(on_cancel: EventHandler<()>, on_confirm: EventHandler<()>) -> Element {
    rsx! {
        div { class: "dialog-backdrop",
            div { class: "dialog",
                h3 { "Do you want to reset all fields?" }
                p {
                    "This action cannot be undone. This will reset and clear all fields. There will be no fields left."
                }
                div { class: "dialog-footer",
                    button { class: "button outline", onclick: move |_| on_cancel.call(()), "Cancel" }
                    button { class: "button", onclick: move |_| on_confirm.call(()), "Reset Fields" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_count_label_matches_badge_text() {
        assert_eq!(field_count_label(0), "Field Count: 0");
        assert_eq!(field_count_label(12), "Field Count: 12");
    }

    #[test]
    fn tab_labels() {
        assert_eq!(PreviewTab::Json.label(), "JSON");
        assert_eq!(PreviewTab::Jsonl.label(), "JSONL");
    }

    #[test]
    fn publish_label_reflects_progress() {
        assert_eq!(publish_button_label(false), "Publish Training Data");
        assert_eq!(publish_button_label(true), "Publishing...");
    }
}
