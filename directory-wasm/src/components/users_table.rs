use directory_client::{
    ListController, Navigation, PAGE_SIZE_OPTIONS, SortKey, format_registration_date,
    page_summary, range_summary,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::labels::{header_label, parse_page_size};
use crate::state::AppState;

const COLUMNS: [(SortKey, &str); 4] = [
    (SortKey::Id, "ID"),
    (SortKey::Name, "Name"),
    (SortKey::Email, "Email"),
    (SortKey::CreatedAt, "Registered"),
];

#[component]
pub(crate) fn UsersTable(state: AppState) -> impl IntoView {
    let controller = state.controller;

    let navigate = move |navigation: Navigation| {
        let request = controller
            .try_update(|c: &mut ListController| c.navigate(navigation))
            .flatten();
        state.fetch(request);
    };

    let on_go_to_page = move |ev: SubmitEvent| {
        ev.prevent_default();
        let request = controller
            .try_update(|c| c.submit_go_to_page())
            .flatten();
        state.fetch(request);
    };

    let on_page_size = move |ev| {
        let Some(size) = parse_page_size(&event_target_value(&ev)) else {
            return;
        };
        let request = controller.try_update(|c| c.set_per_page(size)).flatten();
        state.fetch(request);
    };

    let on_search = move |ev| {
        let term = event_target_value(&ev);
        controller.update(|c| c.set_search_term(term));
        state.schedule_search();
    };

    let on_clear_search = move |_| {
        controller.update(|c| c.clear_search());
        state.schedule_search();
    };

    let at_first = move || controller.with(|c| c.meta().current_page <= 1);
    let at_last = move || controller.with(|c| c.meta().current_page >= c.meta().last_page);

    view! {
        <div class="toolbar">
            <input
                placeholder="Search by id, name or email"
                prop:value=move || controller.with(|c| c.search_term().to_string())
                on:input=on_search
            />
            <button on:click=on_clear_search>"Clear"</button>

            <select on:change=on_page_size>
                {PAGE_SIZE_OPTIONS
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || controller.with(|c| c.per_page() == size)
                            >
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>

            <Show when=move || controller.with(|c| c.is_loading())>
                <span class="loading">"Loading..."</span>
            </Show>
        </div>

        <table>
            <thead>
                <tr>
                    {COLUMNS
                        .into_iter()
                        .map(|(key, title)| {
                            view! {
                                <th on:click=move |_| controller.update(|c| c.toggle_sort(key))>
                                    {move || controller.with(|c| header_label(title, key, c.sort()))}
                                </th>
                            }
                        })
                        .collect_view()}
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || controller.with(|c| c.sorted_users())
                    key=|user| user.id
                    children=move |user| {
                        view! {
                            <tr>
                                <td>{user.id}</td>
                                <td>{user.name.clone()}</td>
                                <td>{user.email.clone()}</td>
                                <td>{format_registration_date(user.created_at)}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>

        <div class="pagination">
            <button on:click=move |_| navigate(Navigation::First) disabled=at_first>"First"</button>
            <button on:click=move |_| navigate(Navigation::Previous) disabled=at_first>
                "Previous"
            </button>
            {move || {
                let current = controller.with(|c| c.meta().current_page);
                controller
                    .with(|c| c.page_window())
                    .into_iter()
                    .map(|page| {
                        view! {
                            <button
                                class:active=page == current
                                on:click=move |_| navigate(Navigation::Page(page))
                            >
                                {page.to_string()}
                            </button>
                        }
                    })
                    .collect_view()
            }}
            <button on:click=move |_| navigate(Navigation::Next) disabled=at_last>"Next"</button>
            <button on:click=move |_| navigate(Navigation::Last) disabled=at_last>"Last"</button>
        </div>

        <form class="go-to-page" on:submit=on_go_to_page>
            <input
                placeholder="Go to page"
                prop:value=move || controller.with(|c| c.go_to_page_input().to_string())
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    controller.update(|c| c.set_go_to_page_input(text));
                }
            />
            <button type="submit">"Go"</button>
            <Show when=move || controller.with(|c| c.go_to_page_error().is_some())>
                <span class="error">
                    {move || {
                        controller.with(|c| c.go_to_page_error().unwrap_or_default().to_string())
                    }}
                </span>
            </Show>
        </form>

        <p class="summary">
            {move || controller.with(|c| page_summary(c.meta()))}
            " · "
            {move || controller.with(|c| range_summary(c.meta()))}
        </p>
    }
}
