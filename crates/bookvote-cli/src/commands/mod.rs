use crate::client::ApiClient;

pub mod list;
pub mod publish;
pub mod stats;
pub mod viewer;
pub mod vote;

#[allow(async_fn_in_trait)]
pub trait Executor {
    async fn run(self, client: &ApiClient) -> anyhow::Result<()>;
}
