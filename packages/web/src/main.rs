use dioxus::prelude::*;

use ui::components::ToastProvider;
use views::{
    AppLayout, HorseCreate, HorseDetail, HorseEdit, HorseFamilyTree, Horses, OwnerCreate, Owners,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[layout(AppLayout)]
        #[route("/horses")]
        Horses {},
        #[route("/horses/create")]
        HorseCreate {},
        #[route("/horses/:id")]
        HorseDetail { id: String },
        #[route("/horses/:id/edit")]
        HorseEdit { id: String },
        #[route("/horses/:id/familytree?:generations")]
        HorseFamilyTree { id: String, generations: String },
        #[route("/owners")]
        Owners {},
        #[route("/owners/create")]
        OwnerCreate {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Horse Registry" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        ToastProvider {
            Router::<Route> {}
        }
    }
}

#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Horses {});
    rsx! {}
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::warn!("No route for /{}, showing the horse list", segments.join("/"));
    let nav = use_navigator();
    nav.replace(Route::Horses {});
    rsx! {}
}
