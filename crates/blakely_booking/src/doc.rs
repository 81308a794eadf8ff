#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{
    BookingListItem, BookingSummary, CreateBookingRequest, CreateBookingResponse,
    ListBookingsResponse,
};
use blakely_common::models::BookingStatus;

#[utoipa::path(
    post,
    path = "/bookings", // Path relative to /api
    request_body(content = CreateBookingRequest, example = json!({
        "clientName": "A",
        "email": "a@x.com",
        "date": "2025-09-01",
        "startTime": "10:00",
        "durationMins": 60,
        "package": "Standard",
        "price": 15000
    })),
    responses(
        (status = 201, description = "Booking created and slot locked", body = CreateBookingResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "That time slot was just taken"),
        (status = 500, description = "Internal error creating booking")
    ),
    tag = "Bookings"
)]
fn doc_create_booking_handler() {}

#[utoipa::path(
    get,
    path = "/bookings", // Path relative to /api
    responses(
        (status = 200, description = "Stored bookings", body = ListBookingsResponse),
        (status = 500, description = "Internal error")
    ),
    tag = "Bookings"
)]
fn doc_list_bookings_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_booking_handler, doc_list_bookings_handler),
    components(schemas(
        CreateBookingRequest,
        CreateBookingResponse,
        BookingSummary,
        BookingListItem,
        ListBookingsResponse,
        BookingStatus
    )),
    tags((name = "Bookings", description = "Slot reservation and booking listing"))
)]
pub struct BookingApiDoc;
