//! Table pages reached from the sidebar. Each row has an actions menu.

use crate::shared::dropdown::{Dropdown, DropdownButton, DropdownItem, DropdownMenu};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Leads,
    Deals,
    Patients,
    Doctors,
    Events,
    Orders,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Leads => "Leads",
            Section::Deals => "Deals",
            Section::Patients => "Patients",
            Section::Doctors => "Doctors",
            Section::Events => "Events",
            Section::Orders => "Orders",
        }
    }

    /// Column headers followed by rows.
    pub fn columns(&self) -> [&'static str; 3] {
        match self {
            Section::Leads => ["Name", "Company", "Status"],
            Section::Deals => ["Deal", "Owner", "Value"],
            Section::Patients => ["Patient", "Ward", "Admitted"],
            Section::Doctors => ["Doctor", "Department", "Shift"],
            Section::Events => ["Event", "Venue", "Date"],
            Section::Orders => ["Order", "Customer", "Total"],
        }
    }

    pub fn rows(&self) -> &'static [[&'static str; 3]] {
        match self {
            Section::Leads => &[
                ["Arlene McCoy", "Acme Corp", "New"],
                ["Cody Fisher", "Globex", "Contacted"],
                ["Esther Howard", "Initech", "Qualified"],
            ],
            Section::Deals => &[
                ["Website redesign", "Jane Cooper", "$12,400"],
                ["Annual support", "Wade Warren", "$8,900"],
            ],
            Section::Patients => &[
                ["Leslie Alexander", "B-12", "2024-03-02"],
                ["Guy Hawkins", "C-04", "2024-03-05"],
            ],
            Section::Doctors => &[
                ["Dr. Hale", "Cardiology", "Day"],
                ["Dr. Nguyen", "Pediatrics", "Night"],
            ],
            Section::Events => &[
                ["Product launch", "Hall A", "2024-05-14"],
                ["Team offsite", "Lakeside", "2024-06-01"],
            ],
            Section::Orders => &[
                ["#1042", "Kristin Watson", "$320.00"],
                ["#1043", "Ralph Edwards", "$89.50"],
                ["#1044", "Courtney Henry", "$1,204.00"],
            ],
        }
    }
}

#[component]
pub fn SectionPage(section: Section) -> impl IntoView {
    let [first, second, third] = section.columns();

    view! {
        <div class="page">
            <h1 class="page__title">{section.title()}</h1>
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{first}</th>
                        <th>{second}</th>
                        <th>{third}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    {section
                        .rows()
                        .iter()
                        .map(|[a, b, c]| view! {
                            <tr>
                                <td>{*a}</td>
                                <td>{*b}</td>
                                <td>{*c}</td>
                                <td class="data-table__actions">
                                    <Dropdown position="right">
                                        <DropdownButton class="icon-btn">{icon("more")}</DropdownButton>
                                        <DropdownMenu>
                                            <DropdownItem>"Open"</DropdownItem>
                                            <DropdownItem>"Edit"</DropdownItem>
                                            <DropdownItem class="text-danger">"Delete"</DropdownItem>
                                        </DropdownMenu>
                                    </Dropdown>
                                </td>
                            </tr>
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Section; 6] = [
        Section::Leads,
        Section::Deals,
        Section::Patients,
        Section::Doctors,
        Section::Events,
        Section::Orders,
    ];

    #[test]
    fn every_section_has_rows() {
        for section in ALL {
            assert!(!section.rows().is_empty(), "{:?} has no rows", section);
            assert!(!section.title().is_empty());
        }
    }
}
