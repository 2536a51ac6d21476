pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod iaphub_api_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod iaphub_api {
            pub(crate) mod update_receipt_body_model;
            pub(crate) mod update_user_body_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod iaphub_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod common;
        pub mod purchase;
        pub mod receipt;
        pub mod user;
    }
    pub mod repositories {
        pub mod iaphub_repository;
    }
}

pub mod client;
pub mod errors;
pub mod transport;
