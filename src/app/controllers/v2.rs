//! Generation 2: controllers return a `ModelView`.

use std::sync::Arc;

use crate::app::controllers::{parse_member, VIEW_MEMBERS, VIEW_NEW_FORM, VIEW_SAVE_RESULT};
use crate::app::member::MemberRepository;
use crate::http::context::{HttpRequest, HttpResponse};
use crate::mvc::{HandlerError, ModelView, ViewController};

pub struct MemberFormController;

impl ViewController for MemberFormController {
    fn process(&self, _request: &HttpRequest, _response: &mut HttpResponse) -> Result<ModelView, HandlerError> {
        Ok(ModelView::new(VIEW_NEW_FORM))
    }
}

pub struct MemberSaveController {
    repository: Arc<MemberRepository>,
}

impl MemberSaveController {
    pub fn new(repository: Arc<MemberRepository>) -> Self {
        Self { repository }
    }
}

impl ViewController for MemberSaveController {
    fn process(&self, request: &HttpRequest, _response: &mut HttpResponse) -> Result<ModelView, HandlerError> {
        let member = parse_member(request.param("username"), request.param("age"))?;
        let member = self.repository.save(member);

        let mut mv = ModelView::new(VIEW_SAVE_RESULT);
        mv.model_mut().try_insert("member", member)?;
        Ok(mv)
    }
}

pub struct MemberListController {
    repository: Arc<MemberRepository>,
}

impl MemberListController {
    pub fn new(repository: Arc<MemberRepository>) -> Self {
        Self { repository }
    }
}

impl ViewController for MemberListController {
    fn process(&self, _request: &HttpRequest, _response: &mut HttpResponse) -> Result<ModelView, HandlerError> {
        let mut mv = ModelView::new(VIEW_MEMBERS);
        mv.model_mut().try_insert("members", self.repository.find_all())?;
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_puts_member_in_model() {
        let repo = Arc::new(MemberRepository::new());
        let req = HttpRequest::post("/save").with_params([("username", "kim"), ("age", "20")]);

        let mv = MemberSaveController::new(repo)
            .process(&req, &mut HttpResponse::new())
            .unwrap();

        assert_eq!(mv.view_name(), VIEW_SAVE_RESULT);
        assert_eq!(
            mv.model().get("member"),
            Some(&json!({"id": 1, "username": "kim", "age": 20}))
        );
    }

    #[test]
    fn test_form_has_empty_model() {
        let mv = MemberFormController
            .process(&HttpRequest::get("/new-form"), &mut HttpResponse::new())
            .unwrap();
        assert_eq!(mv.view_name(), VIEW_NEW_FORM);
        assert!(mv.model().is_empty());
    }
}
