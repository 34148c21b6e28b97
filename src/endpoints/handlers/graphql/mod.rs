pub mod analytics;
pub mod application;
pub mod review;
pub mod scholarship;
pub mod user;

use actix_web::{web, HttpResponse};
use juniper::{http::GraphQLRequest, GraphQLType, GraphQLTypeAsync};
use r2d2::Pool;
use redis::Client;

use super::configs::schema::{GeneralContext, GeneralSchema};

// Generic executor shared by every domain schema. The bounds mirror what the
// schema alias demands: async capable query and mutation roots over the
// shared context, with Send + Sync type info so actix can move them around.
pub async fn graphql<Q, M>(
    pool: web::Data<Pool<Client>>,
    data: web::Json<GraphQLRequest>,
    schema: web::Data<GeneralSchema<Q, M>>,
) -> HttpResponse
where
    Q: GraphQLTypeAsync<Context = GeneralContext> + GraphQLType<Context = GeneralContext>
        + Send
        + Sync,
    Q::TypeInfo: Send + Sync,
    M: GraphQLTypeAsync<Context = GeneralContext> + GraphQLType<Context = GeneralContext>
        + Send
        + Sync,
    M::TypeInfo: Send + Sync,
{
    let context = GeneralContext { pool };

    let res = data.execute(&schema, &context).await;

    return HttpResponse::Ok().json(res);
}
