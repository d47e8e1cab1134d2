// Copyright (c) 2020-present, UMD Database Group.
//
// This program is free software: you can use, redistribute, and/or modify
// it under the terms of the GNU Affero General Public License, version 3
// or later ("AGPL"), as published by the Free Software Foundation.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
// FITNESS FOR A PARTICULAR PURPOSE.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

#![warn(missing_docs, clippy::needless_borrow)]

//! `tickets-function` hosts the tickets handlers on AWS Lambda. Each binary
//! under `src/aws` wires one handler into the Lambda runtime.

use lambda_runtime::{service_fn, Error, LambdaEvent};
use log::{debug, info};
use serde_json::Value;
use std::sync::Arc;
use tickets::prelude::*;

/// Runs one API Gateway proxy event through `handler`.
///
/// An event that isn't a proxy request fails the invocation instead of
/// producing an HTTP response.
pub fn invoke<H>(handler: &H, event: Value) -> Result<Value>
where
    H: Handler + ?Sized,
{
    let request: ApiRequest = serde_json::from_value(event)?;
    let response = handler.handle(&request);
    debug!("{} -> {}", request.method(), response.status_code);
    Ok(serde_json::to_value(&response)?)
}

/// Loads the settings of the function from its environment.
pub fn settings() -> Result<Settings> {
    let settings = Settings::from_env()?;
    info!(
        "Service: {}, metrics namespace: {}, telemetry: {}",
        settings.service_name, settings.metrics_namespace, settings.telemetry
    );
    Ok(settings)
}

/// Serves `handler` on the AWS Lambda runtime until the runtime shuts down.
pub async fn serve<H>(handler: H) -> std::result::Result<(), Error>
where
    H: Handler + 'static,
{
    info!(
        "AWS Lambda function architecture: {}",
        std::env::consts::ARCH
    );

    let handler = Arc::new(handler);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move { invoke(handler.as_ref(), event.payload).map_err(Error::from) }
    }))
    .await
}
