pub mod error;

use error::AccessError;
use lectern_db::util::RequireRecord;
use lectern_db::{content, course, enrollment, module, program, user};
use lectern_entity::course::Model as Course;
use lectern_entity::enrollment::Model as Enrollment;
use lectern_entity::program::Model as Program;
use lectern_entity::user::{Model as User, Status};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

/// Everything the gate resolved while admitting a user to a course.
#[derive(Debug, Clone)]
pub struct Authorization {
    pub user: User,
    pub course: Course,
    pub program: Program,
    pub enrollment: Enrollment,
}

/// The course and program a user is looking at, without the enrollment requirement.
#[derive(Debug, Clone)]
pub struct Audience {
    pub user: User,
    pub course: Course,
    pub program: Program,
}

/// Resolves the course of a content item through its module.
pub async fn course_of_content<C: ConnectionTrait>(conn: &C, content_id: Uuid) -> Result<Uuid, AccessError> {
    let content = content::Query::find_by_id(conn, content_id)
        .await?
        .ok_or(AccessError::ContentNotFound(content_id))?;
    let module = module::Query::find_by_id(conn, content.module_id)
        .await
        .require("module")?;
    Ok(module.course_id)
}

/// Checks that the user is active and part of the audience the course's program is published for.
///
/// Administrators see every program.
pub async fn check_audience<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<Audience, AccessError> {
    let user = user::Query::find_user_by_id(conn, user_id)
        .await?
        .ok_or(AccessError::UserNotFound(user_id))?;
    if user.status != Status::Active {
        tracing::debug!(%user_id, status = ?user.status, "rejecting inactive user");
        return Err(AccessError::UserInactive);
    }

    let course = course::Query::find_by_id(conn, course_id)
        .await?
        .ok_or(AccessError::CourseNotFound(course_id))?;
    let program = program::Query::find_by_id(conn, course.program_id)
        .await
        .require("program")?;

    if !user.role.is_admin() && program.published_for != user.role {
        tracing::debug!(%user_id, %course_id, role = ?user.role, published_for = ?program.published_for, "audience mismatch");
        return Err(AccessError::AudienceMismatch {
            published_for: program.published_for,
            role: user.role,
        });
    }

    Ok(Audience { user, course, program })
}

/// Decides whether `user_id` may progress through `course_id`.
///
/// Requires an active account, a matching audience and an enrollment that actually grants access.
/// An enrollment in [`Tier::Basic`](lectern_entity::tier::Tier::Basic) is known but not granted.
pub async fn authorize<C: ConnectionTrait>(conn: &C, user_id: Uuid, course_id: Uuid) -> Result<Authorization, AccessError> {
    let Audience { user, course, program } = check_audience(conn, user_id, course_id).await?;

    let enrollment = enrollment::Query::get(conn, user_id, program.id).await?;
    let Some(enrollment) = enrollment.filter(|enrollment| enrollment.status.grants_access()) else {
        tracing::debug!(%user_id, program_id = %program.id, "user is not enrolled");
        return Err(AccessError::NotEnrolled { program_id: program.id });
    };

    Ok(Authorization {
        user,
        course,
        program,
        enrollment,
    })
}
