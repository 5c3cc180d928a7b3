use httpsnotif_schema::{ModelConfig, SchemaHandle, SchemaModel, SchemaState};
use httpsnotif_service::validate_relay_notification;

use crate::cmd::{capability_set, CheckArgs};
use crate::exit::{io_error, relay_exit_code, schema_error, CliResult, SUCCESS};
use crate::output::{print_check, CheckReport, OutputFormat};

/// Run the exact server pipeline against a payload file, without a server.
pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let body = std::fs::read(&args.payload).map_err(|err| io_error("payload read failed", err))?;

    // A broken schema file is a caller error here, unlike in serve where it
    // degrades the running receiver.
    let model = SchemaModel::from_file(&args.schema, ModelConfig::default())
        .map_err(|err| schema_error("schema load failed", err))?;
    let schema = SchemaHandle::new();
    schema.publish(SchemaState::Ready(model));

    let capabilities = capability_set(&args.encodings);
    let result = validate_relay_notification(
        Some(&args.content_type),
        &body,
        &capabilities,
        &schema,
    );

    let report = CheckReport::from_result(&result);
    print_check(&report, format);

    match result {
        Ok(()) => Ok(SUCCESS),
        Err(err) => Ok(relay_exit_code(&err)),
    }
}
