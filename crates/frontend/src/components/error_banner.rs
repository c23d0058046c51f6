use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
}

/// Inline error text; renders nothing without a message
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    match props.message.as_deref() {
        Some(message) if !message.is_empty() => html! {
            <div class="text-sm text-red-600 bg-red-50 border border-red-100 rounded-xl p-3">
                {message}
            </div>
        },
        _ => Html::default(),
    }
}
