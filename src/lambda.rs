use exam_result_proxy::utils::{logger, validation::Validate};
use exam_result_proxy::{HttpResultSource, LambdaConfig, ResultProxy};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};

async fn function_handler(
    proxy: &ResultProxy<HttpResultSource>,
    event: Request,
) -> Result<Response<Body>, Error> {
    // iter() 會列出同名參數的每個值，重複由 handle_pairs 回 400
    let params = event.query_string_parameters();
    let response = proxy
        .handle_pairs(event.method().as_str(), params.iter())
        .await;

    let mut builder = Response::builder().status(response.status.as_u16());
    for (name, value) in &response.headers {
        builder = builder.header(*name, value.as_str());
    }

    Ok(builder.body(Body::from(response.body))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後的呼叫共用同一個 HTTP client
    let config = LambdaConfig::from_env()?;
    config.validate()?;
    let proxy = ResultProxy::from_config(&config)?;
    let proxy = &proxy;

    tracing::info!("Starting exam result proxy Lambda function");
    run(service_fn(move |event: Request| async move {
        function_handler(proxy, event).await
    }))
    .await
}
