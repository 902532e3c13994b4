//! Generation 1: controllers write HTML straight into the response.

use std::sync::Arc;

use tera::escape_html;

use crate::app::controllers::parse_member;
use crate::app::member::{Member, MemberRepository};
use crate::http::context::{HttpRequest, HttpResponse};
use crate::mvc::{DirectWriteController, HandlerError};

const HTML: &str = "text/html; charset=utf-8";

fn member_row(member: &Member) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        member.id,
        escape_html(&member.username),
        member.age
    )
}

pub struct MemberFormController;

impl DirectWriteController for MemberFormController {
    fn process(&self, _request: &HttpRequest, response: &mut HttpResponse) -> Result<(), HandlerError> {
        response.set_content_type(HTML);
        response.write(
            "<!DOCTYPE html>\n<html>\n<body>\n\
             <form action=\"save\" method=\"post\">\n\
             username: <input type=\"text\" name=\"username\" />\n\
             age: <input type=\"text\" name=\"age\" />\n\
             <button type=\"submit\">save</button>\n\
             </form>\n</body>\n</html>\n",
        );
        Ok(())
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

impl DirectWriteController for MemberSaveController {
    fn process(&self, request: &HttpRequest, response: &mut HttpResponse) -> Result<(), HandlerError> {
        let member = parse_member(request.param("username"), request.param("age"))?;
        let member = self.repository.save(member);

        response.set_content_type(HTML);
        response.write("<!DOCTYPE html>\n<html>\n<body>\nsuccess\n<ul>\n");
        response.write(&format!("<li>id={}</li>\n", member.id));
        response.write(&format!("<li>username={}</li>\n", escape_html(&member.username)));
        response.write(&format!("<li>age={}</li>\n", member.age));
        response.write("</ul>\n<a href=\"../members\">members</a>\n</body>\n</html>\n");
        Ok(())
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

impl DirectWriteController for MemberListController {
    fn process(&self, _request: &HttpRequest, response: &mut HttpResponse) -> Result<(), HandlerError> {
        response.set_content_type(HTML);
        response.write("<!DOCTYPE html>\n<html>\n<body>\n<table>\n");
        response.write("<thead><tr><th>id</th><th>username</th><th>age</th></tr></thead>\n<tbody>\n");
        for member in self.repository.find_all() {
            response.write(&member_row(&member));
        }
        response.write("</tbody>\n</table>\n</body>\n</html>\n");
        Ok(())
    }
}
