mod courses;
mod quizzes;
mod reviews;
mod users;
