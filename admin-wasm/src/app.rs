use crate::api::ApiStore;
use admin_store::Post;
use admin_view::{AdminModel, Command, Mode, Msg, StoreOp};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

/// The admin page: a create/edit form above the list of existing posts.
///
/// All state lives in [`AdminModel`]; this component translates DOM events
/// into model messages and executes the commands the model emits.
pub struct App {
    model: AdminModel,
    store: ApiStore,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = AdminModel::new();
        let commands = model.start();

        let app = Self {
            model,
            store: ApiStore::new(),
        };
        app.run_commands(ctx, commands);
        app
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let commands = self.model.update(msg);
        self.run_commands(ctx, commands);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let heading = match self.model.mode {
            Mode::Create => "Create Post",
            Mode::Edit { .. } => "Edit Post",
        };

        html! {
            <div class="admin">
                <div class="admin-header">
                    <h1>{ heading }</h1>
                </div>
                { self.view_form(ctx) }
                { self.view_posts(ctx) }
            </div>
        }
    }
}

impl App {
    fn run_commands(&self, ctx: &Context<Self>, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Refresh { seq } => {
                    let store = self.store.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        match store.select_all().await {
                            Ok(posts) => link.send_message(Msg::PostsLoaded { seq, posts }),
                            Err(error) => link.send_message(Msg::StoreFailed {
                                op: StoreOp::Fetch,
                                error,
                            }),
                        }
                    });
                }
                Command::Insert(post) => {
                    let store = self.store.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        match store.insert(&post).await {
                            Ok(_) => link.send_message(Msg::Saved),
                            Err(error) => link.send_message(Msg::StoreFailed {
                                op: StoreOp::Insert,
                                error,
                            }),
                        }
                    });
                }
                Command::Update { id, patch } => {
                    let store = self.store.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        match store.update(id, &patch).await {
                            Ok(_) => link.send_message(Msg::Saved),
                            Err(error) => link.send_message(Msg::StoreFailed {
                                op: StoreOp::Update,
                                error,
                            }),
                        }
                    });
                }
                Command::DeleteRow { id } => {
                    let store = self.store.clone();
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        match store.delete(id).await {
                            Ok(()) => link.send_message(Msg::Deleted),
                            Err(error) => link.send_message(Msg::StoreFailed {
                                op: StoreOp::Delete,
                                error,
                            }),
                        }
                    });
                }
                Command::ScrollToTop => scroll_to_top(),
            }
        }
    }

    fn view_form(&self, ctx: &Context<Self>) -> Html {
        let form = &self.model.form;
        let submit_label = match self.model.mode {
            Mode::Create => "Create Post",
            Mode::Edit { .. } => "Update Post",
        };

        let onsubmit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        });

        html! {
            <form class="admin-form" {onsubmit}>
                <div>
                    <label>{ "Title:" }</label>
                    <input
                        type="text"
                        class="admin-input"
                        value={form.title.clone()}
                        oninput={ctx.link().callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::TitleChanged(input.value())
                        })}
                        required={true}
                    />
                </div>
                <div>
                    <label>{ "Author:" }</label>
                    <input
                        type="text"
                        class="admin-input"
                        value={form.author.clone()}
                        oninput={ctx.link().callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::AuthorChanged(input.value())
                        })}
                        required={true}
                    />
                </div>
                <div>
                    <label>{ "Cover Image URL:" }</label>
                    <input
                        type="text"
                        class="admin-input"
                        value={form.cover_image.clone()}
                        oninput={ctx.link().callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::CoverImageChanged(input.value())
                        })}
                    />
                </div>
                <div>
                    <label>{ "Content:" }</label>
                    <textarea
                        class="admin-editor"
                        value={form.content.clone()}
                        oninput={ctx.link().callback(|e: InputEvent| {
                            let input: HtmlTextAreaElement = e.target_unchecked_into();
                            Msg::ContentChanged(input.value())
                        })}
                    />
                </div>
                <button type="submit" class="admin-submit-button">
                    { submit_label }
                </button>
            </form>
        }
    }

    fn view_posts(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="admin-posts">
                <h2 class="edit-title">{ "Existing Posts" }</h2>
                <ul>
                    { for self.model.posts.iter().map(|post| self.view_post(post, ctx)) }
                </ul>
            </div>
        }
    }

    fn view_post(&self, post: &Post, ctx: &Context<Self>) -> Html {
        let post_id = post.id;
        let edit = ctx.link().callback(move |_| Msg::BeginEdit(post_id));
        let delete = ctx.link().callback(move |_| Msg::Delete(post_id));

        html! {
            <li class="admin-post" key={post_id}>
                <div class="info">
                    <h3>{ &post.title }</h3>
                    <p>{ &post.author }</p>
                </div>
                if let Some(cover) = &post.cover_image {
                    <img src={cover.clone()} alt={post.title.clone()} class="admin-post-image" />
                }
                <div class="admin-buttons">
                    <button onclick={edit} class="admin-edit-button">
                        { "Edit" }
                    </button>
                    <button onclick={delete} class="admin-delete-button">
                        { "Delete" }
                    </button>
                </div>
            </li>
        }
    }
}

// Возвращаем форму в поле зрения при начале редактирования
fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
