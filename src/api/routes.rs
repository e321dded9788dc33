use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::{
    auth::{api as auth_api, auth_middleware, AuthState, JwtHandler, PasswordHasher, UserStore},
    config::Config,
    db::Database,
    middleware::request_logging,
    resources::{api as resource_api, Product, ResourceState, ResourceStore, Student},
};

pub const STUDENTS: &str = "/api_siswa";
pub const STUDENT: &str = "/api_siswa/:id";
pub const PRODUCTS: &str = "/dataproduk";
pub const PRODUCT: &str = "/dataproduk/:id";

/// Everything the router needs, built once at startup
#[derive(Clone)]
pub struct AppContext {
    pub db: Database,
    pub jwt_handler: Arc<JwtHandler>,
    pub hasher: PasswordHasher,
    pub max_page_limit: Option<u32>,
    pub product_create_requires_auth: bool,
}

impl AppContext {
    pub fn from_config(config: &Config, db: Database) -> Self {
        Self {
            db,
            jwt_handler: Arc::new(JwtHandler::new(&config.signing_secret())),
            hasher: PasswordHasher::new(config.bcrypt_cost),
            max_page_limit: config.max_page_limit,
            product_create_requires_auth: config.product_create_requires_auth,
        }
    }
}

/// Create the API router
pub fn create_router(ctx: AppContext) -> Router {
    let gate = middleware::from_fn_with_state(ctx.jwt_handler.clone(), auth_middleware);

    let auth_state = AuthState::new(
        UserStore::new(ctx.db.clone()),
        ctx.jwt_handler.clone(),
        ctx.hasher,
    );

    let auth_routes = Router::new()
        .route("/loginuser", post(auth_api::login))
        .route("/register", post(auth_api::register))
        .merge(
            Router::new()
                .route("/userdetails", get(auth_api::user_details))
                .route_layer(gate.clone()),
        )
        .with_state(auth_state);

    let students = ResourceState::new(
        ResourceStore::<Student>::new(ctx.db.clone()),
        ctx.max_page_limit,
    );

    let student_routes = Router::new()
        .route(
            STUDENTS,
            get(resource_api::list_all::<Student>).post(resource_api::create::<Student>),
        )
        .route(
            STUDENT,
            get(resource_api::get_one::<Student>)
                .put(resource_api::update::<Student>)
                .delete(resource_api::delete::<Student>),
        )
        .route_layer(gate.clone())
        .with_state(students);

    let products = ResourceState::new(
        ResourceStore::<Product>::new(ctx.db.clone()),
        ctx.max_page_limit,
    );

    let mut gated_products = Router::new()
        .route(PRODUCTS, get(resource_api::list_page::<Product>))
        .route(
            PRODUCT,
            get(resource_api::get_one::<Product>)
                .put(resource_api::update::<Product>)
                .delete(resource_api::delete::<Product>),
        );
    let mut open_products = Router::new();

    // Product creation is public unless configured otherwise
    if ctx.product_create_requires_auth {
        gated_products = gated_products.route(PRODUCTS, post(resource_api::create::<Product>));
    } else {
        open_products = open_products.route(PRODUCTS, post(resource_api::create::<Product>));
    }

    let product_routes = gated_products
        .route_layer(gate)
        .merge(open_products)
        .with_state(products);

    Router::new()
        .merge(auth_routes)
        .merge(student_routes)
        .merge(product_routes)
        .layer(middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}
