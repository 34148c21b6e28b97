use actix_web::{web, HttpResponse};
use juniper::{http::graphiql::graphiql_source, EmptyMutation};

use super::handlers::{
    configs::schema::{create_schema, GeneralContext},
    graphql::{
        analytics::AnalyticsQuery,
        application::{ApplicationMutation, ApplicationQuery},
        graphql,
        review::{ReviewMutation, ReviewQuery},
        scholarship::{ScholarshipMutation, ScholarshipQuery},
        user::{UserMutation, UserQuery},
    },
};

// One schema per domain, all executed through the same generic handler.

pub fn graphql_config(config: &mut web::ServiceConfig) {
    config
        .app_data(create_schema(ScholarshipQuery {}, ScholarshipMutation {}))
        .app_data(create_schema(ApplicationQuery {}, ApplicationMutation {}))
        .app_data(create_schema(ReviewQuery {}, ReviewMutation {}))
        .app_data(create_schema(UserQuery {}, UserMutation {}))
        .app_data(create_schema(
            AnalyticsQuery {},
            EmptyMutation::<GeneralContext>::new(),
        ))
        .service(
            web::resource("/graphql/scholarship")
                .route(web::post().to(graphql::<ScholarshipQuery, ScholarshipMutation>)),
        )
        .service(
            web::resource("/graphql/application")
                .route(web::post().to(graphql::<ApplicationQuery, ApplicationMutation>)),
        )
        .service(
            web::resource("/graphql/review")
                .route(web::post().to(graphql::<ReviewQuery, ReviewMutation>)),
        )
        .service(
            web::resource("/graphql/user")
                .route(web::post().to(graphql::<UserQuery, UserMutation>)),
        )
        .service(
            web::resource("/graphql/analytics")
                .route(web::post().to(graphql::<AnalyticsQuery, EmptyMutation<GeneralContext>>)),
        )
        .service(web::resource("/graphiql").route(web::get().to(graphiql)));
}

//For displaying the graphiql page (for trying queries)
async fn graphiql() -> HttpResponse {
    let html = graphiql_source("/graphql/scholarship", None);

    return HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html);
}
