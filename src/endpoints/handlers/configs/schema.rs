use actix_web::web::Data;
use juniper::{EmptySubscription, GraphQLType, GraphQLTypeAsync, RootNode};
use r2d2::Pool;
use redis::Client;

use crate::repos::graphql::{
    analytics::AnalyticsRepo, application::ApplicationRepo, review::ReviewRepo,
    scholarship::ScholarshipRepo, user::UserRepo,
};

//Context Related
#[derive(Clone)]
pub struct GeneralContext {
    pub pool: Data<Pool<Client>>,
}

impl GeneralContext {
    pub fn scholarship_repo(&self) -> ScholarshipRepo {
        ScholarshipRepo {
            pool: self.pool.clone(),
        }
    }
    pub fn application_repo(&self) -> ApplicationRepo {
        ApplicationRepo {
            pool: self.pool.clone(),
        }
    }
    pub fn review_repo(&self) -> ReviewRepo {
        ReviewRepo {
            pool: self.pool.clone(),
        }
    }
    pub fn user_repo(&self) -> UserRepo {
        UserRepo {
            pool: self.pool.clone(),
        }
    }
    pub fn analytics_repo(&self) -> AnalyticsRepo {
        AnalyticsRepo {
            pool: self.pool.clone(),
        }
    }
}

impl juniper::Context for GeneralContext {}

//Schema Related. Every domain here carries mutations, so the root node takes
//both a query and a mutation type instead of juniper's EmptyMutation.
pub type GeneralSchema<Q, M> = RootNode<'static, Q, M, EmptySubscription<GeneralContext>>;

pub fn create_schema<Q, M>(query: Q, mutation: M) -> Data<GeneralSchema<Q, M>>
where
    Q: GraphQLTypeAsync<Context = GeneralContext, TypeInfo = ()>
        + GraphQLType<Context = GeneralContext>
        + Send
        + Sync,
    Q::TypeInfo: Send + Sync,
    M: GraphQLTypeAsync<Context = GeneralContext, TypeInfo = ()>
        + GraphQLType<Context = GeneralContext>
        + Send
        + Sync,
    M::TypeInfo: Send + Sync,
{
    let schema = RootNode::new(query, mutation, EmptySubscription::new());

    // actix wants the schema wrapped as app data
    Data::new(schema)
}
