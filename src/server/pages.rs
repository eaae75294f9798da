//! Server-rendered storefront routes.

use super::AppState;
use super::views::PageError;
use crate::error::ShopError;
use crate::shop::{CartChange, ProductId};
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

/// Renders a page with the layout's shared context (user, cart size, flashes).
fn render_page(
    state: &AppState,
    session: Uuid,
    jar: CookieJar,
    template: &str,
    page: minijinja::Value,
) -> Result<Response, PageError> {
    let (user_id, cart_count) = state
        .sessions
        .read(session, |s| (s.user_id, s.cart.item_count()));
    let user = user_id.and_then(|id| state.shop.user(id));
    let flashes = state.sessions.take_flashes(session);
    let ctx = context! { user, cart_count, flashes, ..page };
    let html = state.views.render(template, ctx)?;
    Ok((jar, html).into_response())
}

fn redirect(jar: CookieJar, to: &str) -> Response {
    (jar, Redirect::to(to)).into_response()
}

pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ProductQuery>,
) -> Result<Response, PageError> {
    let (session, jar) = state.sessions.resolve(jar);
    let products = state
        .shop
        .products(query.category.as_deref(), query.q.as_deref());
    let page = context! {
        products,
        categories => state.shop.categories(),
        category => query.category,
        query => query.q,
    };
    render_page(&state, session, jar, "home.html", page)
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(product_id): Path<ProductId>,
) -> Response {
    let (session, jar) = state.sessions.resolve(jar);
    let change = state
        .sessions
        .with(session, |s| state.shop.add_to_cart(&mut s.cart, product_id));
    match change {
        Some(CartChange::Added) => state.sessions.flash(session, "Product added to cart!"),
        Some(CartChange::Incremented) => state.sessions.flash(session, "Product quantity updated!"),
        None => {}
    }
    redirect(jar, "/")
}

pub async fn cart(State(state): State<AppState>, jar: CookieJar) -> Result<Response, PageError> {
    let (session, jar) = state.sessions.resolve(jar);
    let cart = state.sessions.read(session, |s| s.cart.clone());
    let lines = state.shop.cart_lines(&cart);
    let total: f64 = lines.iter().map(|l| l.subtotal).sum();
    render_page(&state, session, jar, "cart.html", context! { lines, total })
}

pub async fn update_cart(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(product_id): Path<ProductId>,
    Form(form): Form<QuantityForm>,
) -> Response {
    let (session, jar) = state.sessions.resolve(jar);
    if state
        .sessions
        .with(session, |s| s.cart.update(product_id, form.quantity))
    {
        state.sessions.flash(session, "Cart updated!");
    }
    redirect(jar, "/cart")
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(product_id): Path<ProductId>,
) -> Response {
    let (session, jar) = state.sessions.resolve(jar);
    if state.sessions.with(session, |s| s.cart.remove(product_id)) {
        state.sessions.flash(session, "Item removed from cart.");
    }
    redirect(jar, "/cart")
}

pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let (session, jar) = state.sessions.resolve(jar);
    render_page(&state, session, jar, "login.html", context! {})
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<Credentials>,
) -> Response {
    let (session, jar) = state.sessions.resolve(jar);
    match state.shop.login(&form.username, &form.password) {
        Ok(user) => {
            state.sessions.with(session, |s| s.user_id = Some(user.id));
            state
                .sessions
                .flash(session, format!("Welcome back, {}!", user.username));
            redirect(jar, "/")
        }
        Err(e) => {
            state.sessions.flash(session, e.to_string());
            redirect(jar, "/login")
        }
    }
}

pub async fn register_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, PageError> {
    let (session, jar) = state.sessions.resolve(jar);
    render_page(&state, session, jar, "register.html", context! {})
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<Registration>,
) -> Response {
    let (session, jar) = state.sessions.resolve(jar);
    match state.shop.register(&form.username, &form.password, &form.email) {
        Ok(user) => {
            state.sessions.with(session, |s| s.user_id = Some(user.id));
            state.sessions.flash(session, "Account created!");
            redirect(jar, "/")
        }
        Err(e) => {
            state.sessions.flash(session, e.to_string());
            redirect(jar, "/register")
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (session, jar) = state.sessions.resolve(jar);
    state.sessions.with(session, |s| s.user_id = None);
    state.sessions.flash(session, "You have been logged out.");
    redirect(jar, "/")
}

pub async fn checkout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (session, jar) = state.sessions.resolve(jar);
    let result = state
        .sessions
        .with(session, |s| state.shop.checkout(s.user_id, &mut s.cart));
    match result {
        Ok(order) => {
            state.sessions.flash(
                session,
                format!("Order #{} placed! Total: ${:.2}", order.id, order.total),
            );
            redirect(jar, "/orders")
        }
        Err(e) => {
            state.sessions.flash(session, e.to_string());
            let to = match e {
                ShopError::NotLoggedIn => "/login",
                _ => "/cart",
            };
            redirect(jar, to)
        }
    }
}

pub async fn orders(State(state): State<AppState>, jar: CookieJar) -> Result<Response, PageError> {
    let (session, jar) = state.sessions.resolve(jar);
    let Some(user_id) = state.sessions.read(session, |s| s.user_id) else {
        state.sessions.flash(session, "Please log in to see your orders");
        return Ok(redirect(jar, "/login"));
    };
    let orders = state.shop.orders_for(user_id);
    render_page(&state, session, jar, "orders.html", context! { orders })
}
