/*!
 * Common test utilities shared by unit and integration tests
 */
