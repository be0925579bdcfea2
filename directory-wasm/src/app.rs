use leptos::prelude::*;

use crate::components::users_table::UsersTable;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    state.mount();

    view! {
        <main class="page">
            <section class="container">
                <h1>"Users"</h1>
                <UsersTable state=state />
            </section>
        </main>
    }
}
