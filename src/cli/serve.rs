use std::net::SocketAddr;

use clap::Parser;

use crate::{core::Precision, prelude::*, server};

#[derive(Parser)]
pub struct ServeArgs {
    #[clap(long = "bind", env = "BIND_ADDRESS", default_value = "0.0.0.0:8888")]
    address: SocketAddr,
}

impl ServeArgs {
    pub async fn run(self, precision: Precision) -> Result {
        server::serve(self.address, precision).await
    }
}
