//! Generation 4: controllers see only the parameter map.

use std::sync::Arc;

use crate::app::controllers::{parse_member, VIEW_MEMBERS, VIEW_NEW_FORM, VIEW_SAVE_RESULT};
use crate::app::member::MemberRepository;
use crate::http::context::ParamMap;
use crate::mvc::{HandlerError, Model, ModelController};

pub struct MemberFormController;

impl ModelController for MemberFormController {
    fn process(&self, _params: &ParamMap, _model: &mut Model) -> Result<String, HandlerError> {
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

impl ModelController for MemberSaveController {
    fn process(&self, params: &ParamMap, model: &mut Model) -> Result<String, HandlerError> {
        let member = parse_member(
            params.get("username").map(String::as_str),
            params.get("age").map(String::as_str),
        )?;
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

impl ModelController for MemberListController {
    fn process(&self, _params: &ParamMap, model: &mut Model) -> Result<String, HandlerError> {
        model.try_insert("members", self.repository.find_all())?;
        Ok(VIEW_MEMBERS.to_string())
    }
}
