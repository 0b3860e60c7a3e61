use serde::Serialize;

/// A streaming catalog the availability index can search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreamingService {
    /// Catalog id as the availability index names it
    pub id: &'static str,
    pub name: &'static str,
}

/// Services a discovery may be restricted to
pub const STREAMING_SERVICES: &[StreamingService] = &[
    StreamingService { id: "netflix", name: "Netflix" },
    StreamingService { id: "prime", name: "Prime Video" },
    StreamingService { id: "disney", name: "Disney+" },
    StreamingService { id: "hbo", name: "Max" },
    StreamingService { id: "hulu", name: "Hulu" },
    StreamingService { id: "peacock", name: "Peacock" },
    StreamingService { id: "paramount", name: "Paramount+" },
    StreamingService { id: "apple", name: "Apple TV" },
    StreamingService { id: "mubi", name: "MUBI" },
    StreamingService { id: "showtime", name: "Showtime" },
    StreamingService { id: "starz", name: "Starz" },
];

/// Resolves a service id, ignoring case and surrounding whitespace
pub fn find(id: &str) -> Option<&'static StreamingService> {
    let id = id.trim();
    STREAMING_SERVICES
        .iter()
        .find(|service| service.id.eq_ignore_ascii_case(id))
}
