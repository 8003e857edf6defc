use yew::prelude::*;

use crate::config::ClientConfig;
use crate::game::GameView;
use crate::landing::LandingView;

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    pub(crate) config: ClientConfig,
}

/// Landing screen until the player asks to play, then the game loop.
#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let playing = use_state(|| false);

    let content = if *playing {
        html! { <GameView config={props.config.clone()}/> }
    } else {
        let onplay = {
            let playing = playing.clone();
            Callback::from(move |()| {
                log::debug!("entering game");
                playing.set(true);
            })
        };
        html! { <LandingView {onplay}/> }
    };

    html! {
        <div class="app">
            <div class="bg-effects">
                <div class="bg-dots"/>
                <div class="bg-wave"/>
                <div class="bg-wave wave2"/>
            </div>
            {content}
        </div>
    }
}
