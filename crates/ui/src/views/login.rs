use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;

fn login_error_message(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingFields => "Please enter your email and password.",
        AuthError::Api(_) => "Login failed. Check your credentials and try again.",
        _ => "Could not save your login. Please try again.",
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<&'static str>);
    let mut busy = use_signal(|| false);

    let submit = use_callback(move |()| {
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let email = email.peek().clone();
        let password = password.peek().clone();
        busy.set(true);
        spawn(async move {
            match auth.login(&email, &password).await {
                Ok(_) => {
                    error.set(None);
                    navigator.replace(Route::Topics {});
                }
                Err(err) => {
                    tracing::warn!("login failed: {err}");
                    error.set(Some(login_error_message(&err)));
                }
            }
            busy.set(false);
        });
    });

    rsx! {
        div { class: "page login",
            h2 { "Sign in" }
            label { r#for: "login-email", "Email" }
            input {
                id: "login-email",
                r#type: "email",
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            label { r#for: "login-password", "Password" }
            input {
                id: "login-password",
                r#type: "password",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button {
                r#type: "button",
                class: "btn-primary",
                disabled: busy(),
                onclick: move |_| submit.call(()),
                if busy() { "Signing in..." } else { "Sign in" }
            }
        }
    }
}
