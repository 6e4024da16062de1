/// Host notification group all subscriptions join.
pub const GROUP_ID: u32 = 0;

/// `SIMCONNECT_GROUP_PRIORITY_HIGHEST`
pub const GROUP_PRIORITY_HIGHEST: u32 = 1;

/// System events this client listens for. The discriminant is the local event
/// id handed to the host, so it comes back as `uEventID` on every EVENT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum SystemEvent {
    FlightLoaded = 0,
    SimStart,
    View,
    PositionChanged,
    AircraftLoaded,
    Sim,
}

impl SystemEvent {
    pub const ALL: [SystemEvent; 6] = [
        SystemEvent::FlightLoaded,
        SystemEvent::SimStart,
        SystemEvent::View,
        SystemEvent::PositionChanged,
        SystemEvent::AircraftLoaded,
        SystemEvent::Sim,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    /// Name the host knows the event by.
    pub fn host_name(self) -> &'static str {
        match self {
            SystemEvent::FlightLoaded => "FlightLoaded",
            SystemEvent::SimStart => "SimStart",
            SystemEvent::View => "View",
            SystemEvent::PositionChanged => "PositionChanged",
            SystemEvent::AircraftLoaded => "AircraftLoaded",
            SystemEvent::Sim => "Sim",
        }
    }

    /// Name printed when the event fires.
    pub fn label(self) -> &'static str {
        match self {
            SystemEvent::FlightLoaded => "EVENT_FLIGHT_LOADED",
            SystemEvent::SimStart => "EVENT_SIM_START",
            SystemEvent::View => "EVENT_VIEW",
            SystemEvent::PositionChanged => "EVENT_POSITION_CHANGED",
            SystemEvent::AircraftLoaded => "EVENT_AIRCRAFT_LOADED",
            SystemEvent::Sim => "EVENT_SIM",
        }
    }

    pub fn subscription(self) -> Subscription {
        Subscription {
            id: self.id(),
            host_name: self.host_name(),
            label: self.label(),
            masked: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubscriptionKind {
    /// `SubscribeToSystemEvent`
    System,
    /// `MapClientEventToSimEvent`
    Client,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscription {
    pub id: u32,
    pub host_name: &'static str,
    pub label: &'static str,
    pub masked: bool,
}
