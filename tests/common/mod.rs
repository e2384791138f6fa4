use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use bloglist_api::{
    auth::{
        jwt::{Claims, JwtService},
        password::hash_password,
    },
    database::{
        DatabaseManager,
        entities::{BlogRecord, UserRecord},
    },
    test_utils::test_server,
};
use serde_json::Value;
use tower::ServiceExt;

/// Test harness over the full router and an isolated in-memory database.
pub struct TestHarness {
    pub server: bloglist_api::Server,
    pub app: Router,
}

#[allow(dead_code)]
impl TestHarness {
    pub async fn new() -> Self {
        let server = test_server().await;
        let app = server.create_app();
        Self { server, app }
    }

    /// Six-blog seed fixture used across the suites.
    pub fn initial_blogs() -> Vec<BlogRecord> {
        vec![
            BlogRecord::new("React patterns", "https://reactpatterns.com/")
                .with_author("Michael Chan")
                .with_likes(7),
            BlogRecord::new(
                "Go To Statement Considered Harmful",
                "http://www.u.arizona.edu/~rubinson/copyright_violations/Go_To_Considered_Harmful.html",
            )
            .with_author("Edsger W. Dijkstra")
            .with_likes(5),
            BlogRecord::new(
                "Canonical string reduction",
                "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html",
            )
            .with_author("Edsger W. Dijkstra")
            .with_likes(12),
            BlogRecord::new("First class tests", "http://blog.cleancoder.com/first-class-tests")
                .with_author("Robert C. Martin")
                .with_likes(10),
            BlogRecord::new("TDD harms architecture", "http://blog.cleancoder.com/tdd-harms")
                .with_author("Robert C. Martin")
                .with_likes(0),
            BlogRecord::new("Type wars", "http://blog.cleancoder.com/type-wars")
                .with_author("Robert C. Martin")
                .with_likes(2),
        ]
    }

    pub async fn seed_initial_blogs(&self) -> Vec<BlogRecord> {
        let dao = self.server.database.blogs();
        let mut seeded = Vec::new();
        for blog in Self::initial_blogs() {
            seeded.push(dao.insert(&blog).await.unwrap());
        }
        seeded
    }

    pub async fn blogs_in_database(&self) -> Vec<BlogRecord> {
        self.server.database.blogs().find_all().await.unwrap()
    }

    pub async fn blog_by_id(&self, id: i32) -> Option<BlogRecord> {
        self.server.database.blogs().find_by_id(id).await.unwrap()
    }

    pub async fn insert_blog(&self, blog: &BlogRecord) -> BlogRecord {
        self.server.database.blogs().insert(blog).await.unwrap()
    }

    pub async fn users_in_database(&self) -> Vec<UserRecord> {
        self.server
            .database
            .users()
            .find_all_with_blogs()
            .await
            .unwrap()
            .into_iter()
            .map(|(user, _)| user)
            .collect()
    }

    /// Insert a user directly, bypassing the registration endpoint.
    pub async fn register_user(&self, username: &str, name: &str, password: &str) -> UserRecord {
        let password_hash = hash_password(password).unwrap();
        let user = UserRecord::new(username, password_hash).with_name(name);
        self.server.database.users().insert(&user).await.unwrap()
    }

    pub fn token_for(&self, user: &UserRecord) -> String {
        let claims = Claims::new(user.id, user.username.as_str(), 3600);
        self.token_with_claims(&claims)
    }

    pub fn token_with_claims(&self, claims: &Claims) -> String {
        self.server.jwt_service.create_token(claims).unwrap()
    }

    pub fn validate_token(&self, token: &str) -> Claims {
        self.server.jwt_service.validate_token(token).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> axum::response::Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Send and decode the JSON body (Null for an empty body).
    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }
}

/// Request builders shared by the suites.
pub struct RequestBuilder;

#[allow(dead_code)]
impl RequestBuilder {
    pub fn get(path: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    pub fn delete(path: &str) -> Request<Body> {
        Request::builder()
            .method(Method::DELETE)
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    pub fn delete_with_token(path: &str, token: &str) -> Request<Body> {
        Request::builder()
            .method(Method::DELETE)
            .uri(path)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    pub fn post_json(path: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    pub fn post_json_with_token(path: &str, body: &Value, token: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    pub fn put_json(path: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::PUT)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }
}
