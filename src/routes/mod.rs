pub mod health;
pub mod projects;
pub mod tasks;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(users::register)
            .service(users::login)
            .service(users::get_user),
    )
    .service(
        web::scope("/project")
            // "/user" must be registered before the "/{id}" matcher
            .service(projects::get_user_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(projects::delete_project),
    )
    .service(
        web::scope("/task")
            .service(tasks::get_project_tasks)
            .service(tasks::create_task)
            .service(tasks::delete_task),
    );
}
