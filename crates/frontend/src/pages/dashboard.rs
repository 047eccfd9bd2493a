//! Landing page with one card per menu placement.

use crate::shared::dropdown::{Dropdown, DropdownButton, DropdownItem, DropdownMenu};
use crate::shared::icons::icon;
use leptos::prelude::*;
use overlay::{PlacementMode, TriggerMode};

struct DemoCard {
    title: &'static str,
    position: PlacementMode,
    trigger: TriggerMode,
}

const CARDS: &[DemoCard] = &[
    DemoCard {
        title: "Revenue",
        position: PlacementMode::Default,
        trigger: TriggerMode::Click,
    },
    DemoCard {
        title: "New customers",
        position: PlacementMode::Right,
        trigger: TriggerMode::Click,
    },
    DemoCard {
        title: "Appointments",
        position: PlacementMode::TopRight,
        trigger: TriggerMode::Click,
    },
    DemoCard {
        title: "Open tickets",
        position: PlacementMode::TopLeft,
        trigger: TriggerMode::Click,
    },
    DemoCard {
        title: "Conversion",
        position: PlacementMode::Default,
        trigger: TriggerMode::Hover,
    },
];

fn card_view(card: &'static DemoCard) -> impl IntoView {
    view! {
        <div class="card">
            <div class="card__header">
                <h3 class="card__title">{card.title}</h3>
                <Dropdown position=card.position trigger=card.trigger class="card__actions">
                    <DropdownButton class="card__actions-btn">{icon("more")}</DropdownButton>
                    <DropdownMenu>
                        <DropdownItem>"View report"</DropdownItem>
                        <DropdownItem>"Export"</DropdownItem>
                        // Second level: opening it keeps the card menu open.
                        <li role="none">
                            <Dropdown position="top-right">
                                <DropdownButton class="dropdown-item" arrow=true>"Period"</DropdownButton>
                                <DropdownMenu>
                                    <DropdownItem>"Last 7 days"</DropdownItem>
                                    <DropdownItem>"Last 30 days"</DropdownItem>
                                    <DropdownItem>"This year"</DropdownItem>
                                </DropdownMenu>
                            </Dropdown>
                        </li>
                    </DropdownMenu>
                </Dropdown>
            </div>
            <p class="card__hint">{format!("{} menu, {:?} trigger", card.position.as_str(), card.trigger)}</p>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <div class="page">
            <h1 class="page__title">"Dashboard"</h1>
            <div class="card-grid">
                {CARDS.iter().map(card_view).collect_view()}
            </div>
        </div>
    }
}
