//! Model selection shared by the chat ("new session" form) and the arena.

use contracts::domain::a001_chat::aggregate::ChatModel;
use contracts::domain::a002_arena::aggregate::ArenaModel;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
    pub provider: String,
}

impl From<ChatModel> for ModelOption {
    fn from(m: ChatModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            provider: m.provider,
        }
    }
}

impl From<ArenaModel> for ModelOption {
    fn from(m: ArenaModel) -> Self {
        Self {
            id: m.id,
            name: m.name,
            provider: m.provider,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionFull {
    pub cap: usize,
}

/// Ordered set of model ids with an upper bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSelection {
    ids: Vec<String>,
    cap: usize,
}

impl ModelSelection {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            ids: Vec::new(),
            cap,
        }
    }

    /// Add or remove `id`. Adding past the cap is refused and leaves the set unchanged.
    pub fn toggle(&mut self, id: &str) -> Result<(), SelectionFull> {
        if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
            return Ok(());
        }
        if self.ids.len() >= self.cap {
            return Err(SelectionFull { cap: self.cap });
        }
        self.ids.push(id.to_string());
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|x| x == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Drop ids that are no longer offered by the backend.
    pub fn retain_available(&mut self, options: &[ModelOption]) {
        self.ids.retain(|id| options.iter().any(|o| &o.id == id));
    }
}

/// Grid of toggle cards (multi-select).
#[component]
pub fn ModelToggleGrid(
    #[prop(into)] options: Signal<Vec<ModelOption>>,
    #[prop(into)] selected: Signal<Vec<String>>,
    on_toggle: Callback<String>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="model-grid">
            <For
                each=move || options.get()
                key=|m| m.id.clone()
                children=move |model: ModelOption| {
                    let id = model.id.clone();
                    let is_selected = {
                        let id = id.clone();
                        move || selected.with(|s| s.contains(&id))
                    };
                    view! {
                        <button
                            type="button"
                            class=move || if is_selected() { "model-card model-card--selected" } else { "model-card" }
                            disabled=move || disabled.get()
                            on:click=move |_| on_toggle.run(id.clone())
                        >
                            <div class="model-card__name">{model.name.clone()}</div>
                            <div class="model-card__provider">{model.provider.clone()}</div>
                        </button>
                    }
                }
            />
        </div>
    }
}

/// Single-choice dropdown.
#[component]
pub fn ModelSelect(
    #[prop(into)] options: Signal<Vec<ModelOption>>,
    value: RwSignal<String>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <select
            class="model-select"
            prop:value=move || value.get()
            on:change=move |ev| value.set(event_target_value(&ev))
            disabled=move || disabled.get()
        >
            <For
                each=move || options.get()
                key=|m| m.id.clone()
                children=move |model: ModelOption| {
                    let label = if model.provider.is_empty() {
                        model.name.clone()
                    } else {
                        format!("{} ({})", model.name, model.provider)
                    };
                    view! { <option value=model.id.clone()>{label}</option> }
                }
            />
        </select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: &str) -> ModelOption {
        ModelOption {
            id: id.into(),
            name: id.to_uppercase(),
            provider: "test".into(),
        }
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut s = ModelSelection::with_cap(5);
        s.toggle("gpt-4").unwrap();
        s.toggle("claude").unwrap();
        assert!(s.contains("gpt-4"));
        s.toggle("gpt-4").unwrap();
        assert!(!s.contains("gpt-4"));
        assert_eq!(s.ids(), ["claude".to_string()]);
    }

    #[test]
    fn sixth_model_is_refused() {
        let mut s = ModelSelection::with_cap(5);
        for id in ["a", "b", "c", "d", "e"] {
            s.toggle(id).unwrap();
        }
        let before = s.clone();
        assert_eq!(s.toggle("f"), Err(SelectionFull { cap: 5 }));
        assert_eq!(s, before);
        assert_eq!(s.len(), 5);
        // Deselecting still works at the cap
        s.toggle("c").unwrap();
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn retain_available_drops_vanished_models() {
        let mut s = ModelSelection::with_cap(5);
        s.toggle("a").unwrap();
        s.toggle("gone").unwrap();
        s.retain_available(&[option("a"), option("b")]);
        assert_eq!(s.ids(), ["a".to_string()]);
    }
}
