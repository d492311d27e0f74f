use std::str::FromStr;

use axum::{
    body::Bytes,
    extract::{OriginalUri, RawQuery, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{CreateProductRequest, DELETE_ACK, DeleteProductRequest, PatchPriceRequest, Product},
    queries::product_queries,
    soap::{self, SoapFault, SoapRequest, SoapVersion, XmlNode},
};

pub async fn soap_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let xml = match std::str::from_utf8(&body) {
        Ok(xml) => xml,
        Err(e) => {
            let err = AppError::MalformedEnvelope(format!("body is not UTF-8: {}", e));
            return fault_response(SoapVersion::Soap11, err.into());
        }
    };

    let (version, request) = soap::read_request(xml);
    let version = version.unwrap_or(SoapVersion::Soap11);

    let request = match request {
        Ok(request) => request,
        Err(e) => return fault_response(version, e.into()),
    };

    tracing::info!("SOAP call {}", request.operation);

    let operation = request.operation.clone();
    match dispatch(&state, &request).await {
        Ok(fields) => match soap::write_response(version, &operation, &fields) {
            Ok(xml) => xml_response(StatusCode::OK, version, xml),
            Err(e) => fault_response(version, e.into()),
        },
        Err(e) => fault_response(version, e.into()),
    }
}

/// Serves the WSDL on `GET {path}?wsdl`; every other GET is a 404.
pub async fn wsdl(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(query): RawQuery,
) -> Response {
    let wants_wsdl = query
        .as_deref()
        .map(|q| q.split('&').any(|pair| pair.eq_ignore_ascii_case("wsdl")))
        .unwrap_or(false);

    if !wants_wsdl {
        return super::not_found(OriginalUri(uri)).await.into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/xml; charset=utf-8")],
        state.wsdl.to_string(),
    )
        .into_response()
}

async fn dispatch(state: &AppState, request: &SoapRequest) -> Result<Vec<XmlNode>> {
    match request.operation.as_str() {
        "CreateProduct" => create_product(state, request).await,
        "GetProduct" => get_products(state).await,
        "DeleteProduct" => delete_product(state, request).await,
        "PatchPriceProduct" => patch_price_product(state, request).await,
        other => Err(AppError::UnknownOperation(other.to_string())),
    }
}

async fn create_product(state: &AppState, request: &SoapRequest) -> Result<Vec<XmlNode>> {
    let req = validate_create(request)?;

    let product = product_queries::create_product(&state.db, &req).await?;
    tracing::info!("Created product {}", product.id);

    Ok(product.into_fields())
}

async fn get_products(state: &AppState) -> Result<Vec<XmlNode>> {
    let products = product_queries::get_all(&state.db).await?;

    Ok(products.into_iter().map(Product::into_element).collect())
}

async fn delete_product(state: &AppState, request: &SoapRequest) -> Result<Vec<XmlNode>> {
    let req = validate_delete(request)?;

    let deleted = product_queries::delete_product(&state.db, req.id).await?;
    tracing::info!("Delete product {} (removed: {})", req.id, deleted);

    Ok(vec![XmlNode::Text("response", DELETE_ACK.to_string())])
}

async fn patch_price_product(state: &AppState, request: &SoapRequest) -> Result<Vec<XmlNode>> {
    let req = validate_patch_price(request)?;

    let product = product_queries::update_price(&state.db, req.id, req.price).await?;

    Ok(product.map(Product::into_fields).unwrap_or_default())
}

fn validate_create(request: &SoapRequest) -> Result<CreateProductRequest> {
    Ok(CreateProductRequest {
        name: required_text(request, "name")?,
        about: required_text(request, "about")?,
        price: required_price(request)?,
    })
}

fn validate_delete(request: &SoapRequest) -> Result<DeleteProductRequest> {
    Ok(DeleteProductRequest {
        id: required_id(request)?,
    })
}

fn validate_patch_price(request: &SoapRequest) -> Result<PatchPriceRequest> {
    Ok(PatchPriceRequest {
        id: required_id(request)?,
        price: required_price(request)?,
    })
}

fn required_text(request: &SoapRequest, name: &str) -> Result<String> {
    request
        .param(name)
        .map(str::to_string)
        .ok_or_else(|| AppError::InvalidArgument(format!("{} is required", name)))
}

fn required_price(request: &SoapRequest) -> Result<Decimal> {
    let raw = request
        .param("price")
        .ok_or_else(|| AppError::InvalidArgument("price is required".to_string()))?;

    let price = Decimal::from_str(raw)
        .map_err(|_| AppError::InvalidArgument(format!("price is not a number: {}", raw)))?;

    if price <= Decimal::ZERO {
        return Err(AppError::InvalidArgument(
            "price must be greater than zero".to_string(),
        ));
    }

    Ok(price)
}

fn required_id(request: &SoapRequest) -> Result<i32> {
    let raw = request
        .param("id")
        .ok_or_else(|| AppError::InvalidArgument("id is required".to_string()))?;

    match raw.parse::<i32>() {
        Ok(0) | Err(_) => Err(AppError::InvalidArgument(format!("invalid id: {}", raw))),
        Ok(id) => Ok(id),
    }
}

fn fault_response(version: SoapVersion, fault: SoapFault) -> Response {
    match soap::write_fault(version, &fault) {
        Ok(xml) => xml_response(fault.status, version, xml),
        Err(e) => {
            tracing::error!("Failed to write SOAP fault: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, fault.reason).into_response()
        }
    }
}

fn xml_response(status: StatusCode, version: SoapVersion, xml: String) -> Response {
    (status, [(header::CONTENT_TYPE, version.content_type())], xml).into_response()
}
