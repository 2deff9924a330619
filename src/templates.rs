use jiff::Timestamp;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{
    form::{FormField, FormState, Notice},
    models::{MovieRecord, SearchResult},
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

const DISMISS_SCRIPT: &str = r#"
document.querySelectorAll('[data-dismiss-ms]').forEach((el) => {
  setTimeout(() => el.remove(), Number(el.dataset.dismissMs));
});
"#;

const INPUT_CLASS: &str = "mt-1 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500";

pub fn index_page(
    form: &FormState,
    search: Option<&SearchResult>,
    movies: &[MovieRecord],
    now: Timestamp,
) -> String {
    page(
        "Movie App",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-5xl mx-auto px-6 py-10 space-y-8" {
                    h1 class="text-3xl font-bold text-gray-900" { "Movie App" }

                    @if let Some(notice) = &form.notice {
                        (notice_banner(notice, now))
                    }

                    (search_section(search))
                    (movie_form(form))
                    (movie_table(movies))
                }
            }
            script { (PreEscaped(DISMISS_SCRIPT)) }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn notice_banner(notice: &Notice, now: Timestamp) -> Markup {
    html! {
        @if let Some(ms) = notice.remaining_ms(now) {
            p id="notice" class="rounded-md bg-red-50 px-4 py-3 text-red-700" data-dismiss-ms=(ms) { (notice.message) }
        } @else {
            p id="notice" class="rounded-md bg-red-50 px-4 py-3 text-red-700 font-semibold" { (notice.message) }
        }
    }
}

fn search_section(search: Option<&SearchResult>) -> Markup {
    html! {
        section class="bg-white shadow rounded-lg p-6" {
            h2 class="text-xl font-semibold text-gray-900" { "Search Movie By Title" }
            form class="mt-4 flex gap-3" method="get" action="/" {
                input class=(INPUT_CLASS) type="text" name="search" placeholder="Enter movie title"
                    value=[search.map(|s| s.title.as_str())];
                button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
            }

            @if let Some(result) = search {
                @match &result.movie {
                    Some(movie) => { (movie_details(movie)) }
                    None => { p class="mt-4 text-gray-600" { "No movie titled \"" (result.title) "\"." } }
                }
            }
        }
    }
}

fn movie_details(movie: &MovieRecord) -> Markup {
    let fields = &movie.fields;
    html! {
        ul class="mt-4 space-y-1 text-sm text-gray-700" {
            li { strong { "Title: " } (movie.title) }
            li {
                strong { "Description: " } (fields.description.as_deref().unwrap_or("N/A"))
                ", " strong { "Year: " } (display_opt(fields.year))
                ", " strong { "Runtime: " } (display_opt(fields.runtime))
                ", " strong { "Rating: " } (display_opt(fields.rating))
                ", " strong { "Votes: " } (display_opt(fields.votes))
                ", " strong { "Revenue: " } (display_opt(fields.revenue))
            }
            li { strong { "Actors: " } (names_or_na(&movie.actors)) }
            li { strong { "Genres: " } (names_or_na(&movie.genres)) }
            li { strong { "Director: " } (names_or_na(&movie.directors)) }
        }
    }
}

fn movie_form(form: &FormState) -> Markup {
    html! {
        section class="bg-white shadow rounded-lg p-6" {
            h2 class="text-xl font-semibold text-gray-900" { "Add/Update Form" }
            form class="mt-4 grid gap-4 md:grid-cols-2" method="post" action="/movies" {
                input type="hidden" name="editing" value=(if form.editing { "true" } else { "false" });
                @for field in FormField::ALL {
                    (form_input(form, field))
                }
                div class="md:col-span-2 flex gap-3" {
                    button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" {
                        @if form.editing { "Update" } @else { "Add" }
                    }
                    @if form.editing {
                        a class="rounded-md border border-gray-300 px-4 py-2 text-gray-700 hover:bg-gray-100" href="/" { "Cancel" }
                    }
                }
            }
        }
    }
}

fn form_input(form: &FormState, field: FormField) -> Markup {
    let (label, kind) = match field {
        FormField::Title => ("Title", "text"),
        FormField::Description => ("Description", "text"),
        FormField::Year => ("Year", "number"),
        FormField::Runtime => ("Runtime", "number"),
        FormField::Rating => ("Rating", "number"),
        FormField::Votes => ("Votes", "number"),
        FormField::Revenue => ("Revenue", "number"),
        FormField::Actors => ("Actors", "text"),
        FormField::Genres => ("Genres", "text"),
        FormField::Director => ("Director", "text"),
    };
    let step = matches!(field, FormField::Rating | FormField::Revenue).then_some("any");
    let locked = form.editing && field == FormField::Title;

    html! {
        label class="block text-sm font-medium text-gray-700" {
            (label)
            input class=(INPUT_CLASS) type=(kind) name=(field.name()) placeholder=(label)
                value=(form.fields.get(field)) step=[step]
                required[field == FormField::Title] readonly[locked];
        }
    }
}

fn movie_table(movies: &[MovieRecord]) -> Markup {
    html! {
        section class="bg-white shadow rounded-lg p-6" {
            h2 class="text-xl font-semibold text-gray-900" { "Movie List" }
            @if movies.is_empty() {
                p class="mt-4 text-gray-600" { "No movies yet." }
            } @else {
                table class="mt-4 w-full border-collapse text-sm" {
                    thead {
                        tr class="border-b text-left text-gray-700" {
                            th class="py-2" { "Title" }
                            th { "Director" }
                            th { "Genres" }
                            th { "Actors" }
                            th { "Actions" }
                        }
                    }
                    tbody {
                        @for movie in movies {
                            tr class="border-b align-top" {
                                td class="py-2 font-medium text-gray-900" { (movie.title) }
                                td { (names_or_na(&movie.directors)) }
                                td { (name_list(&movie.genres)) }
                                td { (name_list(&movie.actors)) }
                                td class="flex gap-2 py-2" {
                                    a class="text-blue-600 hover:text-blue-800" href=(edit_href(&movie.title)) { "Update" }
                                    form method="post" action="/movies/delete" {
                                        input type="hidden" name="title" value=(movie.title);
                                        button class="text-red-600 hover:text-red-800" type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn name_list(names: &[String]) -> Markup {
    html! {
        ul {
            @for name in names {
                li { (name) }
            }
        }
    }
}

fn names_or_na(names: &[String]) -> String {
    if names.is_empty() { "N/A".to_string() } else { names.join(", ") }
}

fn display_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn edit_href(title: &str) -> String {
    format!("/?edit={}", urlencoding::encode(title))
}
