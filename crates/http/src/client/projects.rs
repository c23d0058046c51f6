//! Projects and their sub-resources

use crate::client::{ClientError, MidartClient, file_part, segment};
use chrono::NaiveDate;
use midart_core::{
    BudgetItem, CalendarEntry, CreatedProject, Funding, NewBudgetItem, NewCalendarEntry,
    NewProject, ProjectDetail, ProjectPatch, ProjectPhoto, SupportPledge, Upload,
};
use reqwest::Method;
use reqwest::multipart::Form;
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Serialize)]
struct CollaboratorRequest<'a> {
    username: &'a str,
}

#[derive(Serialize)]
struct ManifestationRequest<'a> {
    name: &'a str,
}

impl MidartClient {
    /// Create a project from the multipart create form. Funding is enabled
    /// when a goal is given.
    pub async fn create_project(&self, project: &NewProject) -> Result<CreatedProject, ClientError> {
        let mut form = Form::new()
            .text("title", project.title.clone())
            .text("description", project.description.clone())
            .text("project_type", project.project_type.as_str().to_string())
            .text("status", project.status.as_str().to_string())
            .text("budget_type", project.budget_type.as_str().to_string());

        if let Some(start) = project.start_date {
            form = form.text("start_date", start.format(DATE_FORMAT).to_string());
        }
        if let Some(end) = project.end_date {
            form = form.text("end_date", end.format(DATE_FORMAT).to_string());
        }
        if let Some(cover) = &project.cover_photo {
            form = form.part("cover_photo", file_part(cover)?);
        }
        if let Some(goal) = project.funding_goal {
            form = form
                .text("enable_funding", "true")
                .text("funding_goal", format!("{goal:.2}"));
        }

        let request = self.request(Method::POST, "/projects/").multipart(form);
        self.execute(request).await
    }

    pub async fn project(&self, id: u64) -> Result<ProjectDetail, ClientError> {
        let request = self.request(Method::GET, &format!("/projects/{id}/"));
        self.execute(request).await
    }

    /// Partial update; unset fields are left alone
    pub async fn update_project(&self, id: u64, patch: &ProjectPatch) -> Result<(), ClientError> {
        let request = self
            .request(Method::PATCH, &format!("/projects/{id}/"))
            .json(patch);
        self.execute_empty(request).await
    }

    pub async fn delete_project(&self, id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/projects/{id}/"));
        self.execute_empty(request).await
    }

    pub async fn upload_project_photo(
        &self,
        id: u64,
        image: &Upload,
        caption: &str,
    ) -> Result<ProjectPhoto, ClientError> {
        let form = Form::new()
            .part("image", file_part(image)?)
            .text("caption", caption.to_string());
        let request = self
            .request(Method::POST, &format!("/projects/{id}/photos/"))
            .multipart(form);
        self.execute(request).await
    }

    pub async fn delete_project_photo(&self, id: u64, photo_id: u64) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("/projects/{id}/photos/{photo_id}/"));
        self.execute_empty(request).await
    }

    /// Calendar notes for one month
    pub async fn calendar_entries(
        &self,
        id: u64,
        year: i32,
        month: u32,
    ) -> Result<Vec<CalendarEntry>, ClientError> {
        let request = self
            .request(Method::GET, &format!("/projects/{id}/calendar/"))
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        self.execute(request).await
    }

    /// Create or replace the note for a day
    pub async fn save_calendar_entry(
        &self,
        id: u64,
        entry: &NewCalendarEntry,
    ) -> Result<CalendarEntry, ClientError> {
        let request = self
            .request(Method::POST, &format!("/projects/{id}/calendar/"))
            .json(entry);
        self.execute(request).await
    }

    pub async fn delete_calendar_entry(&self, id: u64, date: NaiveDate) -> Result<(), ClientError> {
        let path = format!("/projects/{id}/calendar/{}/", date.format(DATE_FORMAT));
        let request = self.request(Method::DELETE, &path);
        self.execute_empty(request).await
    }

    pub async fn add_collaborator(&self, id: u64, username: &str) -> Result<(), ClientError> {
        let request = self
            .request(Method::POST, &format!("/projects/{id}/collaborators/"))
            .json(&CollaboratorRequest { username });
        self.execute_empty(request).await
    }

    pub async fn remove_collaborator(&self, id: u64, username: &str) -> Result<(), ClientError> {
        let path = format!("/projects/{id}/collaborators/{}/", segment(username));
        let request = self.request(Method::DELETE, &path);
        self.execute_empty(request).await
    }

    pub async fn add_manifestation(&self, id: u64, name: &str) -> Result<(), ClientError> {
        let request = self
            .request(Method::POST, &format!("/projects/{id}/manifestations/"))
            .json(&ManifestationRequest { name });
        self.execute_empty(request).await
    }

    pub async fn remove_manifestation(&self, id: u64, name: &str) -> Result<(), ClientError> {
        let path = format!("/projects/{id}/manifestations/{}/", segment(name));
        let request = self.request(Method::DELETE, &path);
        self.execute_empty(request).await
    }

    pub async fn project_funding(&self, id: u64) -> Result<Funding, ClientError> {
        let request = self.request(Method::GET, &format!("/projects/{id}/funding/"));
        self.execute(request).await
    }

    pub async fn support_project(&self, id: u64, pledge: &SupportPledge) -> Result<(), ClientError> {
        let request = self
            .request(Method::POST, &format!("/projects/{id}/support/"))
            .json(pledge);
        self.execute_empty(request).await
    }

    /// Owner only. Creates the funding record on first use.
    pub async fn add_budget_item(
        &self,
        id: u64,
        item: &NewBudgetItem,
    ) -> Result<BudgetItem, ClientError> {
        let request = self
            .request(Method::POST, &format!("/projects/{id}/add_budget_item/"))
            .json(item);
        self.execute(request).await
    }
}
