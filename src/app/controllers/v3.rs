//! Generation 3: controllers fill an adapter-owned model and return a view name.

use std::sync::Arc;

use crate::app::controllers::{parse_member, VIEW_MEMBERS, VIEW_NEW_FORM, VIEW_SAVE_RESULT};
use crate::app::member::MemberRepository;
use crate::http::context::HttpRequest;
use crate::mvc::{HandlerError, Model, SimpleViewController};

pub struct MemberFormController;

impl SimpleViewController for MemberFormController {
    fn process(&self, _request: &HttpRequest, _model: &mut Model) -> Result<String, HandlerError> {
        Ok(VIEW_NEW_FORM.to_string())
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

impl SimpleViewController for MemberSaveController {
    fn process(&self, request: &HttpRequest, model: &mut Model) -> Result<String, HandlerError> {
        let member = parse_member(request.param("username"), request.param("age"))?;
        model.try_insert("member", self.repository.save(member))?;
        Ok(VIEW_SAVE_RESULT.to_string())
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

impl SimpleViewController for MemberListController {
    fn process(&self, _request: &HttpRequest, model: &mut Model) -> Result<String, HandlerError> {
        model.try_insert("members", self.repository.find_all())?;
        Ok(VIEW_MEMBERS.to_string())
    }
}
