//! 路由入口
//!
//! 提供 [`create_app_router`] 函数，导出当前App的所有路由。
//!
//! 导出路由时传入共享数据 [`AppState`]，所有路由函数都可以通过 `State` 访问。
//! 权限通过 handler 参数中的 [`CurrentUser`](crate::auth::CurrentUser) /
//! [`Superuser`](crate::auth::Superuser) 提取器声明。

use crate::routes::auth::{__path_login, __path_register, login, register};
use crate::routes::donations::{__path_create_donation, __path_list_donations, __path_my_donations};
use crate::routes::donations::{create_donation, list_donations, my_donations};
use crate::routes::health::{__path_health, health};
use crate::routes::projects::{__path_create_project, __path_delete_project, __path_get_project};
use crate::routes::projects::{__path_list_projects, __path_update_project};
use crate::routes::projects::{create_project, delete_project, get_project, list_projects, update_project};
use crate::routes::reports::{__path_closed_projects, closed_projects};
use crate::routes::users::{__path_get_me, __path_get_user, __path_update_me, __path_update_user};
use crate::routes::users::{get_me, get_user, update_me, update_user};
use crate::AppState;
use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_scalar::{Scalar, Servable};

pub mod auth;
pub mod donations;
pub mod health;
pub mod projects;
pub mod reports;
pub mod users;

/// 导出当前App的所有路由
///
/// ## **❗️注意事项：**
///
/// [`routes!`] 宏要求同一个宏里的接口使用相同的路径，并且不能出现相同的http方法。
/// 不能这样定义：
///
/// ```rust,ignore
/// routes!(get, get, post)
/// ```
///
/// 需要按路径拆开定义
///
/// ```rust,ignore
/// routes!(get, post)
/// .routes!(get)
/// ```
///
fn routers(state: AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(health))
        .routes(routes!(list_projects, create_project))
        .routes(routes!(get_project, update_project, delete_project))
        .routes(routes!(create_donation, list_donations))
        .routes(routes!(my_donations))
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(get_me, update_me))
        .routes(routes!(get_user, update_user))
        .routes(routes!(closed_projects))
        .with_state(state)
}

/// 在文档中声明 Bearer token 认证方式
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

/// 创建当前App的路由
///
/// 完成以下功能：
/// - 生成OpenAPI文档
/// - 生成App路由
/// - 使用Scalar作为最终在线文档格式
///
/// 由于使用了 `utoipa` 库来自动化生成`openapi`文档，因此我们没有使用原生的 [`Router`]，而是使用了
/// [`OpenApiRouter`] 。
pub fn create_app_router(shared_state: AppState) -> Router {
    // 当前项目的OpenAPI声明
    #[derive(OpenApi)]
    #[openapi(
        modifiers(&SecurityAddon),
        tags(
            (name = "charity-fund", description = r#"
慈善基金后端：

- 慈善项目管理（超级管理员）
- 捐款及自动分配（先进先出）
- 用户注册与JWT登录
            "#)
        ),
    )]
    struct ApiDoc;

    // 使用`utoipa_axum`提供的OpenApiRouter来创建路由。
    // - router: Axum的Router，实际的路由对象
    // - api: utoipa的OpenApi，生成的OpenAPI对象
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api/v1", routers(shared_state))
        .split_for_parts();

    // 合并文档路由，用户可通过 /docs 访问文档网页地址
    router.merge(Scalar::with_url("/docs", api))
}
