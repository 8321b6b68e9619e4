use super::Target;
use crate::sequence::ContentSequence;
use lectern_db::{content, course, module, program, quiz};
use lectern_entity::progress::Model as Progress;
use sea_orm::{ConnectionTrait, DbErr};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// A single write of a deletion cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    RepointProgress {
        user_id: Uuid,
        course_id: Uuid,
        content_id: Uuid,
        percentage: i32,
    },
    DropProgress { user_id: Uuid, course_id: Uuid },
    DropCourseProgress { course_id: Uuid },
    DeleteSubmissions { quiz_instance_id: Uuid },
    DeleteQuestions { quiz_instance_id: Uuid },
    DeleteQuizInstance { quiz_instance_id: Uuid },
    DeleteContent { content_id: Uuid },
    DeleteModule { module_id: Uuid },
    DeleteCertificates { course_id: Uuid },
    DeleteReviews { course_id: Uuid },
    DeleteCourse { course_id: Uuid },
    DeleteEnrollments { program_id: Uuid },
    DeleteProgram { program_id: Uuid },
}

/// Snapshot of the part of the content tree that is about to be deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub target: Target,
    /// Quiz instance owned by a content node.
    pub quiz_instance_id: Option<Uuid>,
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn leaf(target: Target) -> Self {
        Self {
            target,
            quiz_instance_id: None,
            children: Vec::new(),
        }
    }

    /// Content ids below this node in tree order.
    #[must_use]
    pub fn content_ids(&self) -> Vec<Uuid> {
        let mut ids = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Target::Content(id) = node.target {
                ids.push(id);
            }
            stack.extend(node.children.iter().rev());
        }
        ids
    }

    /// Writes that have to happen before any child is removed.
    fn on_enter(&self, steps: &mut Vec<Step>) {
        match self.target {
            Target::Content(_) => {
                if let Some(quiz_instance_id) = self.quiz_instance_id {
                    steps.push(Step::DeleteSubmissions { quiz_instance_id });
                    steps.push(Step::DeleteQuestions { quiz_instance_id });
                    steps.push(Step::DeleteQuizInstance { quiz_instance_id });
                }
            }
            Target::Course(course_id) => {
                steps.push(Step::DropCourseProgress { course_id });
                steps.push(Step::DeleteCertificates { course_id });
                steps.push(Step::DeleteReviews { course_id });
            }
            Target::Module(_) | Target::Program(_) => {}
        }
    }

    /// Writes that remove the node itself once all children are gone.
    fn on_exit(&self, steps: &mut Vec<Step>) {
        match self.target {
            Target::Content(content_id) => steps.push(Step::DeleteContent { content_id }),
            Target::Module(module_id) => steps.push(Step::DeleteModule { module_id }),
            Target::Course(course_id) => steps.push(Step::DeleteCourse { course_id }),
            Target::Program(program_id) => {
                steps.push(Step::DeleteEnrollments { program_id });
                steps.push(Step::DeleteProgram { program_id });
            }
        }
    }
}

enum Visit<'a> {
    Enter(&'a Node),
    Exit(&'a Node),
}

/// Orders the deletes of a tree so that dependents always go before the row they reference.
#[must_use]
pub fn cascade_steps(root: &Node) -> Vec<Step> {
    let mut steps = Vec::new();
    let mut stack = vec![Visit::Enter(root)];
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(node) => {
                node.on_enter(&mut steps);
                stack.push(Visit::Exit(node));
                stack.extend(node.children.iter().rev().map(Visit::Enter));
            }
            Visit::Exit(node) => node.on_exit(&mut steps),
        }
    }
    steps
}

/// Progress fixes for rows pointing at contents that are about to be removed.
///
/// A row moves back to the closest surviving content before its pointer in the whole course
/// sequence, with the percentage that content will have afterwards. Rows without such a content
/// are dropped.
#[must_use]
pub fn repair_steps(sequence: &ContentSequence, removed: &HashSet<Uuid>, rows: &[Progress]) -> Vec<Step> {
    let remaining = sequence.without(removed);
    rows.iter()
        .filter(|row| removed.contains(&row.content_id))
        .map(|row| {
            let survivor = sequence
                .position(row.content_id)
                .and_then(|index| sequence.preceding_survivor(index, removed));
            match survivor.and_then(|id| remaining.position(id).map(|index| (id, index))) {
                Some((content_id, index)) => Step::RepointProgress {
                    user_id: row.user_id,
                    course_id: row.course_id,
                    content_id,
                    percentage: remaining.percentage_at(index),
                },
                None => Step::DropProgress {
                    user_id: row.user_id,
                    course_id: row.course_id,
                },
            }
        })
        .collect()
}

/// Loads the subtree below `target`. `None` if the target does not exist.
pub async fn load_tree<C: ConnectionTrait>(conn: &C, target: Target) -> Result<Option<Node>, DbErr> {
    match target {
        Target::Content(content_id) => {
            if content::Query::find_by_id(conn, content_id).await?.is_none() {
                return Ok(None);
            }
            let quiz_instance = quiz::instance::Query::find_by_content(conn, content_id).await?;
            Ok(Some(Node {
                target,
                quiz_instance_id: quiz_instance.map(|instance| instance.id),
                children: Vec::new(),
            }))
        }
        Target::Module(module_id) => {
            if module::Query::find_by_id(conn, module_id).await?.is_none() {
                return Ok(None);
            }
            Ok(Some(module_node(conn, module_id).await?))
        }
        Target::Course(course_id) => {
            if course::Query::find_by_id(conn, course_id).await?.is_none() {
                return Ok(None);
            }
            Ok(Some(course_node(conn, course_id).await?))
        }
        Target::Program(program_id) => {
            if program::Query::find_by_id(conn, program_id).await?.is_none() {
                return Ok(None);
            }
            let courses = course::Query::find_by_program(conn, program_id).await?;
            let mut children = Vec::with_capacity(courses.len());
            for course in courses {
                children.push(course_node(conn, course.id).await?);
            }
            Ok(Some(Node {
                target,
                quiz_instance_id: None,
                children,
            }))
        }
    }
}

async fn course_node<C: ConnectionTrait>(conn: &C, course_id: Uuid) -> Result<Node, DbErr> {
    let modules = module::Query::find_by_course(conn, course_id).await?;
    let mut children = Vec::with_capacity(modules.len());
    for module in modules {
        children.push(module_node(conn, module.id).await?);
    }
    Ok(Node {
        target: Target::Course(course_id),
        quiz_instance_id: None,
        children,
    })
}

async fn module_node<C: ConnectionTrait>(conn: &C, module_id: Uuid) -> Result<Node, DbErr> {
    let contents = content::Query::find_by_modules(conn, &[module_id]).await?;
    let content_ids: Vec<Uuid> = contents.iter().map(|content| content.id).collect();
    let quiz_instances: HashMap<Uuid, Uuid> = quiz::instance::Query::find_by_contents(conn, &content_ids)
        .await?
        .into_iter()
        .map(|instance| (instance.content_id, instance.id))
        .collect();

    let children = content_ids
        .into_iter()
        .map(|content_id| Node {
            target: Target::Content(content_id),
            quiz_instance_id: quiz_instances.get(&content_id).copied(),
            children: Vec::new(),
        })
        .collect();
    Ok(Node {
        target: Target::Module(module_id),
        quiz_instance_id: None,
        children,
    })
}
