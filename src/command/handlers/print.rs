//! Print operations: printRaw, printText, printReceipt
//!
//! Every print checks the connection before encoding, so a call with no
//! open link writes nothing.

use super::HandlerContext;
use crate::connection::ConnectionManager;
use crate::error::{PrinterError, PrinterResult};
use crate::protocol::{RawParams, ReceiptParams, Response, TextParams};
use spp_escpos::PrintRequest;
use tracing::info;

fn ensure_connected(manager: &ConnectionManager) -> PrinterResult<()> {
    if manager.is_connected() {
        Ok(())
    } else {
        Err(PrinterError::NotConnected)
    }
}

/// Handle printRaw
pub async fn handle_print_raw(
    manager: &mut ConnectionManager,
    params: &RawParams,
) -> PrinterResult<Response> {
    let encoded = params
        .data
        .as_deref()
        .ok_or_else(|| PrinterError::DecodeError("data required".into()))?;
    ensure_connected(manager)?;
    let data = spp_escpos::encode_raw(encoded)?;

    let written = manager.write(&data).await?;
    info!("  [printRaw] {} bytes", written);
    Ok(Response::Printed {
        success: true,
        bytes: Some(written),
    })
}

/// Handle printText
pub async fn handle_print_text(
    manager: &mut ConnectionManager,
    params: &TextParams,
) -> PrinterResult<Response> {
    ensure_connected(manager)?;

    let request = PrintRequest::StyledText {
        text: params.text.clone(),
        bold: params.bold,
        centered: params.center,
        cut_after: params.cut,
    };
    let written = manager.write(&request.encode()).await?;
    info!("  [printText] {} bytes", written);
    Ok(Response::Printed {
        success: true,
        bytes: None,
    })
}

/// Handle printReceipt
pub async fn handle_print_receipt(
    ctx: &HandlerContext,
    manager: &mut ConnectionManager,
    params: &ReceiptParams,
) -> PrinterResult<Response> {
    ensure_connected(manager)?;

    let request = PrintRequest::Receipt {
        title: params
            .title
            .clone()
            .unwrap_or_else(|| ctx.default_receipt_title.clone()),
        subtitle: params.subtitle.clone(),
        body: params.content.clone(),
        footer: params.footer.clone(),
    };
    let written = manager.write(&request.encode()).await?;
    info!("  [printReceipt] {} bytes", written);
    Ok(Response::Printed {
        success: true,
        bytes: None,
    })
}
