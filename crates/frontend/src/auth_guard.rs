//! Authentication guard component for protected routes

use crate::app::Route;
use crate::auth::use_session;
use crate::components::LoadingSpinner;
use midart_core::{GuardDecision, guard};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProtectedRouteProps {
    pub children: Children,
}

/// Renders its children only for a logged-in user. Nothing else is shown
/// until the startup probe settles.
#[function_component(ProtectedRoute)]
pub fn protected_route(props: &ProtectedRouteProps) -> Html {
    let session = use_session();

    match guard(&session.session) {
        GuardDecision::Loading => html! { <LoadingSpinner /> },
        GuardDecision::RedirectToLogin => html! { <Redirect<Route> to={Route::Login} /> },
        GuardDecision::Render => html! { <>{ props.children.clone() }</> },
    }
}
