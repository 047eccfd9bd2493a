use crate::layout::Shell;
use crate::pages::dashboard::DashboardPage;
use crate::pages::section::{Section, SectionPage};
use crate::pages::NotFound;
use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Shell>
            <Routes fallback=|| view! { <NotFound /> }>
                <Route path=path!("/") view=DashboardPage />
                <Route path=path!("/crm") view=|| view! { <SectionPage section=Section::Leads /> } />
                <Route path=path!("/crm/deals") view=|| view! { <SectionPage section=Section::Deals /> } />
                <Route path=path!("/hospital") view=|| view! { <SectionPage section=Section::Patients /> } />
                <Route path=path!("/hospital/doctors") view=|| view! { <SectionPage section=Section::Doctors /> } />
                <Route path=path!("/events") view=|| view! { <SectionPage section=Section::Events /> } />
                <Route path=path!("/ecommerce") view=|| view! { <SectionPage section=Section::Orders /> } />
            </Routes>
        </Shell>
    }
}
