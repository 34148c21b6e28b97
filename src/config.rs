use envconfig::Envconfig;

#[derive(Envconfig, Debug)]
pub struct Env {
    #[envconfig(from = "HOST")]
    pub host: String,

    #[envconfig(from = "PORT")]
    pub port: u16,

    #[envconfig(from = "REDIS_URL")]
    pub redis_url: String,

    #[envconfig(from = "STRIPE_SECRET_KEY")]
    pub stripe_secret_key: String,

    // Overridable so staging can point at stripe-mock
    #[envconfig(from = "STRIPE_API_URL", default = "https://api.stripe.com")]
    pub stripe_api_url: String,
}

impl Env {
    pub fn env_init() -> Env {
        Env::init_from_env().unwrap()
    }
}
