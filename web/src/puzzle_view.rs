use rebus_core::{EMPTY_PLACEHOLDER, LOADING_PLACEHOLDER, PuzzleDisplay};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct PuzzleViewProps {
    /// Markup straight from the puzzle service.
    #[prop_or_default]
    pub(crate) svg: Option<AttrValue>,
    #[prop_or_default]
    pub(crate) loading: bool,
}

#[function_component(PuzzleView)]
pub(crate) fn puzzle_view(props: &PuzzleViewProps) -> Html {
    let content = match PuzzleDisplay::plan(props.svg.as_deref(), props.loading) {
        PuzzleDisplay::Loading => html! {
            <div class="loading-spinner">{LOADING_PLACEHOLDER}</div>
        },
        PuzzleDisplay::Empty => html! {
            <p>{EMPTY_PLACEHOLDER}</p>
        },
        // Trusted: the only source is the configured generation backend.
        PuzzleDisplay::Markup(svg) => Html::from_html_unchecked(svg.into_inner().into()),
    };

    html! {
        <div class="svg-container">{content}</div>
    }
}
