//! Arena - View Component

use contracts::domain::a002_arena::aggregate::ModelResponse;
use leptos::prelude::*;
use thaw::*;

use super::view_model::ArenaVm;
use crate::domain::a002_arena::ui::state::MIN_MODELS;
use crate::layout::use_modal;
use crate::shared::components::attachment_picker::AttachmentPicker;
use crate::shared::components::model_picker::ModelToggleGrid;
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_cost, format_count};
use crate::system::auth::context::use_auth;

#[component]
#[allow(non_snake_case)]
pub fn ArenaPage() -> impl IntoView {
    let (_, set_auth_state) = use_auth();
    let vm = ArenaVm::new(use_modal(), set_auth_state);
    vm.load();

    let comparing = Signal::derive(move || vm.state.with(|s| s.comparing));
    let busy = Signal::derive(move || vm.state.with(|s| s.is_busy()));
    let can_compare = Signal::derive(move || {
        let prompt = vm.prompt.get();
        vm.state.with(|s| s.can_compare(&prompt))
    });

    view! {
        <div class="arena-page">
            <PageHeader
                title="Арена"
                subtitle=format!("Один запрос нескольким моделям (минимум {})", MIN_MODELS)
            >
                <span class="arena-page__counter">
                    "Выбрано: " {move || vm.state.with(|s| s.selected_label())}
                </span>
            </PageHeader>

            <ModelToggleGrid
                options=Signal::derive(move || vm.models.get())
                selected=vm.selected_ids()
                on_toggle=Callback::new(move |id: String| vm.toggle(id))
                disabled=busy
            />

            <div class="arena-input">
                <Textarea
                    value=vm.prompt
                    placeholder="Введите запрос для сравнения... (Ctrl+Enter для отправки)"
                    attr:style="width: 100%; min-height: 80px; resize: vertical;"
                    disabled=busy
                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                        if ev.key() == "Enter" && ev.ctrl_key() {
                            ev.prevent_default();
                            vm.compare();
                        }
                    }
                />
                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                    <AttachmentPicker queue=vm.pending_files disabled=busy />
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || !can_compare.get())
                        on_click=move |_| vm.compare()
                    >
                        {icon("arena")}
                        {move || if comparing.get() { " Сравнение..." } else { " Сравнить" }}
                    </Button>
                </Flex>
            </div>

            {move || vm.state.with(|s| s.error.clone()).map(|e| view! {
                <div class="error-message">{e}</div>
            })}

            <Show when=move || comparing.get()>
                <div class="arena-loading"><Spinner label="Модели отвечают..." /></div>
            </Show>

            <Show when=move || vm.state.with(|s| s.result.is_some())>
                <ResultsSection vm=vm />
            </Show>
        </div>
    }
}

#[component]
fn ResultsSection(vm: ArenaVm) -> impl IntoView {
    let arbitrating = Signal::derive(move || vm.state.with(|s| s.arbitrating));
    let responses = move || {
        vm.state
            .with(|s| s.result.as_ref().map(|r| r.responses.clone()))
            .unwrap_or_default()
    };

    view! {
        <div class="arena-results">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2>"Результаты"</h2>
                <Flex align=FlexAlign::Center style="gap: 12px;">
                    <span class="arena-results__total">
                        "Общая стоимость: " {move || format_cost(vm.state.with(|s| s.total_cost()))}
                    </span>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || !vm.state.with(|s| s.can_arbitrate()))
                        on_click=move |_| vm.arbitrate()
                    >
                        {icon("scale")}
                        {move || if arbitrating.get() { " Арбитраж..." } else { " Арбитраж" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=arbitrating
                        on_click=move |_| vm.clear_results()
                    >
                        {icon("close")}
                        " Очистить"
                    </Button>
                </Flex>
            </Flex>

            {move || vm.state.with(|s| s.summary.clone()).map(|summary| view! {
                <div class="arena-summary">
                    <h3>"Вывод арбитра"</h3>
                    <div class="arena-summary__text">{summary.summary}</div>
                    <div class="arena-summary__meta">"Стоимость: " {format_cost(summary.cost)}</div>
                </div>
            })}

            <div class="arena-results__grid">
                <For
                    each=responses
                    key=|r| r.model.clone()
                    children=|r: ModelResponse| view! { <ResponseCard response=r /> }
                />
            </div>
        </div>
    }
}

#[component]
fn ResponseCard(response: ModelResponse) -> impl IntoView {
    let name = response.display_name().to_string();
    let body = match response.error.clone() {
        Some(error) => view! {
            <div class="arena-card__error">"Ошибка: " {error}</div>
        }
        .into_any(),
        None => {
            let text = response.response.clone();
            view! { <div class="arena-card__text">{text}</div> }.into_any()
        }
    };
    let class = if response.is_success() {
        "arena-card"
    } else {
        "arena-card arena-card--failed"
    };
    let model = response.model.clone();
    let tokens = token_line(&response);
    let cost = format_cost(response.cost);

    view! {
        <div class=class>
            <div class="arena-card__header">
                <strong>{name}</strong>
                <Badge>{model}</Badge>
            </div>
            {body}
            <div class="arena-card__meta">
                {tokens}
                " • "
                {cost}
            </div>
        </div>
    }
}

fn token_line(response: &ModelResponse) -> String {
    format!(
        "{} вх. / {} вых. токенов",
        format_count(response.input_tokens),
        format_count(response.output_tokens)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_line_formats_counts() {
        let r = ModelResponse {
            model: "gpt-4".into(),
            model_name: "GPT-4".into(),
            response: "hi".into(),
            input_tokens: 1200,
            output_tokens: 35,
            cost: 0.01,
            error: None,
        };
        assert_eq!(token_line(&r), "1 200 вх. / 35 вых. токенов");
    }
}
