use yew::prelude::*;

use crate::game::GUESS_PLACEHOLDER;
use crate::puzzle_view::PuzzleView;

pub(crate) const TITLE: &str = "Puzzles";
pub(crate) const SUBTITLE: &str = "By ItchyGeek";

/// Hand-drawn sample rebus ("four score"), shown before the first real puzzle is requested.
const PREVIEW_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300" fill="none" stroke="#fff" stroke-width="4"><text x="40" y="170" fill="#fff" stroke="none" font-size="120" font-family="sans-serif">4</text><path d="M150 200 L260 90 M170 220 L280 110"/></svg>"##;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct LandingProps {
    pub(crate) onplay: Callback<()>,
}

#[function_component(LandingView)]
pub(crate) fn landing_view(props: &LandingProps) -> Html {
    let onclick = props.onplay.reform(|_: MouseEvent| ());

    html! {
        <div class="landing-container">
            <header class="header-container landing-header">
                <h1>{TITLE}</h1>
                <p class="subtitle">{SUBTITLE}</p>
            </header>
            <section class="preview-section">
                <div class="preview-card">
                    <PuzzleView svg={AttrValue::from(PREVIEW_SVG)}/>
                    <div class="preview-input">
                        <span>{GUESS_PLACEHOLDER}</span>
                    </div>
                </div>
            </section>
            <div class="landing-actions">
                <button class="play-btn" {onclick}>{"Play Now"}</button>
            </div>
        </div>
    }
}
