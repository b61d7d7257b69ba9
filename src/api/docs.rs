//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

/// Aggregated OpenAPI description served by the optional Swagger UI.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "therapy-gateway",
        description = "Appointment booking API for a therapist/patient marketplace."
    ),
    paths(
        crate::api::handlers::availability::create_availability,
        crate::api::handlers::availability::list_availability,
        crate::api::handlers::appointment::book_slot,
        crate::api::handlers::appointment::list_my_appointments,
        crate::api::handlers::appointment::update_status,
        crate::api::handlers::reminder::list_my_reminders,
        crate::api::handlers::system::health_handler,
    ),
    tags(
        (name = "Availability", description = "Publishing and listing open slots"),
        (name = "Appointments", description = "Booking and status decisions"),
        (name = "Reminders", description = "Upcoming reminders for patients"),
        (name = "System", description = "Health and diagnostics"),
    )
)]
pub struct ApiDoc;
