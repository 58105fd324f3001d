use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use redraft::api::function_handler;
use redraft::app::{App, Deployment};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    redraft::setup_logging();

    let app = App::from_env(Deployment::Lambda).await?;
    let app = &app;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(app, event).await
    }))
    .await
}
